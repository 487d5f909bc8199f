use serde::{Deserialize, Serialize};

/// OPC UA value-rank constants.
pub mod value_rank {
    pub const SCALAR_OR_ONE_DIMENSION: i32 = -3;
    pub const ANY: i32 = -2;
    pub const SCALAR: i32 = -1;
    pub const ONE_OR_MORE_DIMENSIONS: i32 = 0;
    pub const ONE_DIMENSION: i32 = 1;
}

/// Shape of a value: single, one-dimensional array or N-dimensional matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SchemaRank {
    #[default]
    Scalar,
    Collection,
    Matrix,
}

impl SchemaRank {
    pub const ALL: [SchemaRank; 3] = [Self::Scalar, Self::Collection, Self::Matrix];

    /// Derive the rank from an OPC UA value rank and its array dimensions.
    ///
    /// Negative ranks (scalar, any, scalar-or-one-dimension) are scalars,
    /// ranks 0 and 1 are collections, anything higher is a matrix. Two or
    /// more declared dimensions always make a matrix.
    pub fn from_value_rank(value_rank: i32, array_dimensions: &[u32]) -> Self {
        if value_rank > value_rank::ONE_DIMENSION || array_dimensions.len() > 1 {
            Self::Matrix
        } else if value_rank >= value_rank::ONE_OR_MORE_DIMENSIONS {
            Self::Collection
        } else {
            Self::Scalar
        }
    }

    /// Suffix appended to type names of non-scalar variants.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Scalar => "",
            Self::Collection => "Collection",
            Self::Matrix => "Matrix",
        }
    }
}
