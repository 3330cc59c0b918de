use crate::model::VertexSet;

const INDENT: &str = "   ";

impl VertexSet {
    /// Writes the set in the notation the parser reads: one vertex per
    /// line, wrapped in `{ }` (closed) or `[ ]` (open) for polylines.
    pub fn to_notation(&self) -> String {
        let mut out = String::new();
        let braces = self
            .is_polyline
            .then(|| if self.is_closed { ('{', '}') } else { ('[', ']') });

        if let Some((open, _)) = braces {
            out.push(open);
            out.push('\n');
        }

        for v in &self.vertices {
            let line = if self.is_2d {
                format!("{INDENT}{}, {}\n", v.x, v.y)
            } else {
                format!("{INDENT}{}, {}, {}\n", v.x, v.y, v.z)
            };
            out.push_str(&line);
        }

        if let Some((_, close)) = braces {
            out.push(close);
            out.push('\n');
        }
        out
    }
}

/// Concatenates the notation of every set. Adjacent ungrouped sets merge
/// when read back; grouped sets keep their boundaries.
pub fn write_sets<'a>(sets: impl IntoIterator<Item = &'a VertexSet>) -> String {
    sets.into_iter().map(VertexSet::to_notation).collect()
}
