//! Core type definitions: DType, Dim4.

/// Runtime tag for the element kinds an array can hold.
///
/// The set is closed; every variant has a corresponding [`crate::Element`]
/// implementation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DType {
    F32,
    F64,
    C32,
    C64,
    S32,
    U32,
    S64,
    U64,
    U8,
    S8,
    S16,
    U16,
}

impl DType {
    /// Size in bytes of a single element.
    pub fn size_bytes(self) -> usize {
        match self {
            DType::U8 | DType::S8 => 1,
            DType::S16 | DType::U16 => 2,
            DType::F32 | DType::S32 | DType::U32 => 4,
            DType::F64 | DType::C32 | DType::S64 | DType::U64 => 8,
            DType::C64 => 16,
        }
    }

    /// Whether this kind carries a complex value.
    pub fn is_complex(self) -> bool {
        matches!(self, DType::C32 | DType::C64)
    }
}

impl std::fmt::Display for DType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DType::F32 => "f32",
            DType::F64 => "f64",
            DType::C32 => "c32",
            DType::C64 => "c64",
            DType::S32 => "s32",
            DType::U32 => "u32",
            DType::S64 => "s64",
            DType::U64 => "u64",
            DType::U8 => "u8",
            DType::S8 => "s8",
            DType::S16 => "s16",
            DType::U16 => "u16",
        };
        write!(f, "{name}")
    }
}

/// Fixed rank-4 extents `(width, height, channels, batch)`.
///
/// Also used for strides, expressed in elements rather than bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Dim4(pub [u64; 4]);

impl Dim4 {
    pub fn new(dims: [u64; 4]) -> Self {
        Self(dims)
    }

    /// Total number of elements.
    pub fn elements(&self) -> u64 {
        self.0.iter().product()
    }

    /// Strides of a freshly allocated contiguous array of these extents:
    /// dimension 0 (width) is the fastest-moving axis.
    pub fn strides(&self) -> Dim4 {
        let [w, h, c, _] = self.0;
        Dim4([1, w, w * h, w * h * c])
    }
}

impl std::ops::Index<usize> for Dim4 {
    type Output = u64;

    fn index(&self, i: usize) -> &u64 {
        &self.0[i]
    }
}

impl std::fmt::Display for Dim4 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, d) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{d}")?;
        }
        write!(f, "]")
    }
}
