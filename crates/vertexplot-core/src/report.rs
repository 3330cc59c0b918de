use crate::geom::{BBox2, BBox3, Vec2};
use crate::model::VertexSet;
use crate::parser::{ParseError, ParseOutput};
use crate::viewport::{GridSteps, Viewport};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Warning {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetReport {
    pub index: usize,
    pub vertex_count: usize,
    pub is_polyline: bool,
    pub is_closed: bool,
    pub is_2d: bool,
    pub bounds: Option<BBox3>,
}

impl SetReport {
    pub fn new(index: usize, set: &VertexSet) -> Self {
        let bounds = set.bounds();
        Self {
            index,
            vertex_count: set.len(),
            is_polyline: set.is_polyline,
            is_closed: set.is_closed,
            is_2d: set.is_2d,
            bounds: (!bounds.is_void()).then_some(bounds),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseReport {
    pub sets: Vec<SetReport>,
    pub errors: Vec<ParseError>,
    pub vertices_total: usize,
    pub bounds: Option<BBox3>,
    pub warnings: Vec<Warning>,
}

impl ParseReport {
    pub fn new(output: &ParseOutput) -> Self {
        let mut bounds = BBox3::VOID;
        for set in &output.sets {
            bounds.add_box(&set.bounds());
        }

        let mut warnings = Vec::new();
        if output.sets.is_empty() {
            warnings.push(Warning {
                code: "no_vertices".to_string(),
                message: "No vertex with at least two values was found.".to_string(),
            });
        }
        for error in &output.errors {
            warnings.push(Warning {
                code: "brace_error".to_string(),
                message: format!("{} at character {}", error.kind, error.position),
            });
        }

        Self {
            sets: output
                .sets
                .iter()
                .enumerate()
                .map(|(i, set)| SetReport::new(i, set))
                .collect(),
            errors: output.errors.clone(),
            vertices_total: output.vertex_count(),
            bounds: (!bounds.is_void()).then_some(bounds),
            warnings,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitReport {
    pub scale: Vec2,
    pub center: Vec2,
    pub visible: BBox2,
    pub grid: GridSteps,
    pub status: String,
}

impl FitReport {
    pub fn new(viewport: &Viewport) -> Self {
        Self {
            scale: viewport.plot_scale,
            center: viewport.plot_center,
            visible: viewport.visible_bounds(),
            grid: viewport.grid_steps(),
            status: format!("{} ({})", viewport.status_bounds(), viewport.status_size()),
        }
    }
}
