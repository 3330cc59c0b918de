use crate::camera::OrthoCamera;
use crate::error::{GeometryError, Result};
use crate::geom::{BBox2, BBox3, Vec2, Vec3};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Polygon or line loop over the vertices of a [`VertexSet`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Face {
    pub indices: Vec<usize>,
}

impl Face {
    pub fn new(indices: impl Into<Vec<usize>>) -> Self {
        Self {
            indices: indices.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexSet {
    pub vertices: Vec<Vec3>,
    faces: Vec<Face>,
    lines: Vec<Segment>,
    /// Draw consecutive vertices as connected segments when no faces exist.
    pub is_polyline: bool,
    /// Connect the last vertex back to the first. Only used with `is_polyline`.
    pub is_closed: bool,
    /// Display hint: the z component is irrelevant.
    pub is_2d: bool,
    pub point_color: Option<Color>,
    pub line_color: Option<Color>,
    pub fill_color: Option<Color>,
}

impl Default for VertexSet {
    fn default() -> Self {
        Self::new()
    }
}

impl VertexSet {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
            lines: Vec::new(),
            is_polyline: false,
            is_closed: false,
            is_2d: true,
            point_color: None,
            line_color: None,
            fill_color: None,
        }
    }

    pub fn polyline(vertices: Vec<Vec3>, closed: bool) -> Self {
        let mut set = Self::new();
        set.vertices = vertices;
        set.is_polyline = true;
        set.is_closed = closed;
        set.auto_set_2d();
        set
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn lines(&self) -> &[Segment] {
        &self.lines
    }

    pub fn push_vertex(&mut self, vertex: Vec3) {
        if vertex.z != 0.0 {
            self.is_2d = false;
        }
        self.vertices.push(vertex);
    }

    /// Appends a vertex built from up to three values (x, y, z). Missing
    /// components are zero; extra values are ignored.
    pub fn add_vertex(&mut self, values: &[f64]) {
        let component = |i: usize| values.get(i).copied().unwrap_or(0.0);
        self.push_vertex(Vec3::new(component(0), component(1), component(2)));
    }

    pub fn remove_vertex(&mut self, index: usize) -> Option<Vec3> {
        (index < self.vertices.len()).then(|| self.vertices.remove(index))
    }

    pub fn auto_set_2d(&mut self) {
        self.is_2d = !self.vertices.iter().any(|v| v.z != 0.0);
    }

    pub fn add_face(&mut self, face: Face) -> Result<()> {
        for &index in &face.indices {
            self.check_index(index)?;
        }
        self.faces.push(face);
        Ok(())
    }

    pub fn add_line(&mut self, segment: Segment) -> Result<()> {
        self.check_index(segment.start)?;
        self.check_index(segment.end)?;
        self.lines.push(segment);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.faces.clear();
        self.lines.clear();
    }

    pub fn bounds(&self) -> BBox3 {
        BBox3::from_vertices(&self.vertices)
    }

    pub fn bounds_2d(&self) -> BBox2 {
        self.bounds().to_2d()
    }

    /// Segments a renderer draws for this set, in world space.
    ///
    /// Explicit faces and lines take precedence; without faces a polyline
    /// set connects consecutive vertices. Indices left dangling by a later
    /// vertex removal are reported here.
    pub fn line_segments(&self) -> Result<Vec<(Vec3, Vec3)>> {
        let mut out = Vec::new();

        for face in &self.faces {
            self.push_loop(&face.indices, &mut out)?;
        }
        for segment in &self.lines {
            out.push((self.vertex(segment.start)?, self.vertex(segment.end)?));
        }

        if self.faces.is_empty() && self.is_polyline && self.vertices.len() > 1 {
            out.extend(self.vertices.iter().copied().tuple_windows::<(Vec3, Vec3)>());
            if self.is_closed && self.vertices.len() > 2 {
                out.push((self.vertices[self.vertices.len() - 1], self.vertices[0]));
            }
        }

        Ok(out)
    }

    fn push_loop(&self, indices: &[usize], out: &mut Vec<(Vec3, Vec3)>) -> Result<()> {
        for (&a, &b) in indices.iter().tuple_windows() {
            out.push((self.vertex(a)?, self.vertex(b)?));
        }
        if let [first, .., last] = indices {
            if indices.len() > 2 {
                out.push((self.vertex(*last)?, self.vertex(*first)?));
            }
        }
        Ok(())
    }

    fn vertex(&self, index: usize) -> Result<Vec3> {
        self.vertices
            .get(index)
            .copied()
            .ok_or(GeometryError::IndexOutOfRange {
                index,
                len: self.vertices.len(),
            })
    }

    fn check_index(&self, index: usize) -> Result<()> {
        self.vertex(index).map(|_| ())
    }
}

/// Handle to one of the sets owned by a [`PlotData`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SetId {
    Default,
    Extra(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VertexRef {
    pub set: SetId,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotData {
    default_set: VertexSet,
    /// Legacy index list drawn over the default set.
    default_face: Face,
    sets: Vec<VertexSet>,
    selected_set: Option<SetId>,
    selected_index: Option<usize>,
}

impl Default for PlotData {
    fn default() -> Self {
        Self::new()
    }
}

impl PlotData {
    pub fn new() -> Self {
        Self {
            default_set: VertexSet::new(),
            default_face: Face::default(),
            sets: Vec::new(),
            selected_set: Some(SetId::Default),
            selected_index: None,
        }
    }

    pub fn from_sets(sets: Vec<VertexSet>) -> Self {
        let mut plot = Self::new();
        plot.replace_sets(sets);
        plot
    }

    pub fn default_set(&self) -> &VertexSet {
        &self.default_set
    }

    pub fn default_set_mut(&mut self) -> &mut VertexSet {
        self.refresh_selection();
        &mut self.default_set
    }

    pub fn default_face(&self) -> &Face {
        &self.default_face
    }

    pub fn sets(&self) -> &[VertexSet] {
        &self.sets
    }

    pub fn set(&self, id: SetId) -> Option<&VertexSet> {
        match id {
            SetId::Default => Some(&self.default_set),
            SetId::Extra(i) => self.sets.get(i),
        }
    }

    pub fn set_mut(&mut self, id: SetId) -> Option<&mut VertexSet> {
        self.refresh_selection();
        match id {
            SetId::Default => Some(&mut self.default_set),
            SetId::Extra(i) => self.sets.get_mut(i),
        }
    }

    /// The default set first, then every extra set in order.
    pub fn iter_sets(&self) -> impl Iterator<Item = (SetId, &VertexSet)> {
        std::iter::once((SetId::Default, &self.default_set)).chain(
            self.sets
                .iter()
                .enumerate()
                .map(|(i, set)| (SetId::Extra(i), set)),
        )
    }

    pub fn add_point(&mut self, point: Vec3) {
        self.refresh_selection();
        self.default_set.push_vertex(point);
    }

    /// Appends a vertex index to the default face.
    pub fn add_line_index(&mut self, index: usize) -> Result<()> {
        if index >= self.default_set.len() {
            return Err(GeometryError::IndexOutOfRange {
                index,
                len: self.default_set.len(),
            });
        }
        self.default_face.indices.push(index);
        Ok(())
    }

    pub fn add_set(&mut self, set: VertexSet) -> SetId {
        self.refresh_selection();
        self.sets.push(set);
        SetId::Extra(self.sets.len() - 1)
    }

    pub fn remove_set(&mut self, index: usize) -> Result<VertexSet> {
        if index >= self.sets.len() {
            return Err(GeometryError::NoSuchSet(SetId::Extra(index)));
        }
        let removed = self.sets.remove(index);
        match self.selected_set {
            Some(SetId::Extra(i)) if i == index => {
                self.selected_set = None;
                self.selected_index = None;
            }
            Some(SetId::Extra(i)) if i > index => {
                self.selected_set = Some(SetId::Extra(i - 1));
            }
            _ => {}
        }
        Ok(removed)
    }

    /// Replaces the whole geometry in one step, the way an external editor
    /// applies its edited copies back.
    pub fn replace_sets(&mut self, sets: Vec<VertexSet>) {
        self.default_set.clear();
        self.default_face.indices.clear();
        self.sets = sets;
        self.selected_set = Some(SetId::Default);
        self.selected_index = None;
    }

    pub fn clear_all(&mut self) {
        self.default_set.clear();
        self.default_face.indices.clear();
        self.sets.clear();
        self.selected_set = None;
        self.selected_index = None;
    }

    pub fn selected_set(&self) -> Option<SetId> {
        self.selected_set
    }

    /// The selected vertex index, or `None` once it no longer fits the
    /// selected set (e.g. after vertices were removed elsewhere). Every
    /// `&mut self` method stores the cleared index, so growing the set again
    /// does not bring a stale selection back.
    pub fn selected_index(&self) -> Option<usize> {
        let index = self.selected_index?;
        match self.selected_set.map(|id| self.set(id)) {
            Some(Some(set)) if index >= set.len() => None,
            Some(None) => None,
            _ => Some(index),
        }
    }

    fn refresh_selection(&mut self) {
        self.selected_index = self.selected_index();
    }

    pub fn select(&mut self, set: Option<SetId>, index: Option<usize>) {
        self.selected_set = set;
        self.selected_index = index;
    }

    pub fn selected_vertex(&self) -> Option<VertexRef> {
        Some(VertexRef {
            set: self.selected_set?,
            index: self.selected_index()?,
        })
    }

    /// Moves the selection by `dir`, wrapping at either end. Selects the
    /// default set first when nothing is selected.
    pub fn advance_selected_point(&mut self, dir: isize) {
        self.refresh_selection();
        let id = *self.selected_set.get_or_insert(SetId::Default);
        let count = self.set(id).map_or(0, VertexSet::len);

        let current = self.selected_index().map_or(-1, |i| i as isize);
        let next = current + dir;

        self.selected_index = if count == 0 {
            None
        } else if next >= count as isize {
            Some(0)
        } else if next < 0 {
            Some(count - 1)
        } else {
            Some(next as usize)
        };
    }

    pub fn delete_selected_point(&mut self) -> Option<Vec3> {
        self.refresh_selection();
        let VertexRef { set, index } = self.selected_vertex()?;
        let removed = self.set_mut(set)?.remove_vertex(index)?;
        self.advance_selected_point(-1);
        Some(removed)
    }

    pub fn bounds_2d(&self) -> BBox2 {
        self.iter_sets()
            .fold(BBox2::VOID, |acc, (_, set)| acc.union(&set.bounds_2d()))
    }

    pub fn bounds_3d(&self) -> BBox3 {
        let mut bounds = BBox3::VOID;
        for (_, set) in self.iter_sets() {
            bounds.add_box(&set.bounds());
        }
        bounds
    }

    /// Every segment a renderer draws: the default face, then each set.
    pub fn line_segments(&self) -> Result<Vec<(Vec3, Vec3)>> {
        let mut out = Vec::new();
        self.default_set.push_loop(&self.default_face.indices, &mut out)?;
        for (_, set) in self.iter_sets() {
            out.extend(set.line_segments()?);
        }
        Ok(out)
    }

    /// Nearest vertex to `world` in the XY plane no further than `radius`.
    pub fn hit_test(&self, world: Vec2, radius: f64) -> Option<VertexRef> {
        let max_dist_sq = radius * radius;
        let mut best: Option<(f64, VertexRef)> = None;

        for (id, set) in self.iter_sets() {
            for (index, vertex) in set.vertices.iter().enumerate() {
                let dist_sq = world.distance_sq(vertex.xy());
                if dist_sq > max_dist_sq {
                    continue;
                }
                match best {
                    Some((best_dist, _)) if dist_sq >= best_dist => {}
                    _ => best = Some((dist_sq, VertexRef { set: id, index })),
                }
            }
        }

        best.map(|(_, hit)| hit)
    }

    /// Hit-tests and moves the selection to the result. A miss keeps the
    /// selected set and clears the index.
    pub fn select_nearest(&mut self, world: Vec2, radius: f64) -> Option<VertexRef> {
        self.refresh_selection();
        let hit = self.hit_test(world, radius);
        match hit {
            Some(VertexRef { set, index }) => self.select(Some(set), Some(index)),
            None => self.selected_index = None,
        }
        hit
    }

    /// Deep copy with every vertex moved into the camera's frame.
    pub fn projected(&self, camera: &OrthoCamera) -> Self {
        let mut copy = self.clone();
        copy.default_set.transform_with(camera);
        for set in &mut copy.sets {
            set.transform_with(camera);
        }
        copy
    }
}

impl VertexSet {
    fn transform_with(&mut self, camera: &OrthoCamera) {
        for v in &mut self.vertices {
            *v = camera.transform_point(*v);
        }
    }
}
