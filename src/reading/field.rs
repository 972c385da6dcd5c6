//! Which temperature a data cell holds.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// The first three data cells of an archive row, in page order.
pub enum Field {
    Max,
    Min,
    Mean,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Max, Field::Min, Field::Mean];

    /// Maps a zero-based data cell index to its field. Later columns (snow,
    /// precipitation, ...) have no field.
    pub fn from_column(column: usize) -> Option<Self> {
        match column {
            0 => Some(Field::Max),
            1 => Some(Field::Min),
            2 => Some(Field::Mean),
            _ => None,
        }
    }
}
