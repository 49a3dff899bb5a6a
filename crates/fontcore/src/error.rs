//! Errors for the fontcore engine: a structured `(module, kind)` pair,
//! matching the closed error-kind taxonomy every subsystem reports into.

use std::fmt;
use thiserror::Error;

/// The subsystem that produced an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Module {
    Base,
    Cache,
    AutoHint,
    Sfnt,
    TrueType,
    Type1,
    Cff,
    Cid,
    PsAux,
    Smooth,
    Tfm,
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Module::Base => "base",
            Module::Cache => "cache",
            Module::AutoHint => "autohint",
            Module::Sfnt => "sfnt",
            Module::TrueType => "truetype",
            Module::Type1 => "type1",
            Module::Cff => "cff",
            Module::Cid => "cid",
            Module::PsAux => "psaux",
            Module::Smooth => "smooth",
            Module::Tfm => "tfm",
        };
        f.write_str(name)
    }
}

/// The closed set of error kinds, grouped by category.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    // Bad input
    #[error("invalid argument")]
    InvalidArgument,
    #[error("invalid glyph index")]
    InvalidGlyphIndex,
    #[error("invalid character code")]
    InvalidCharacterCode,
    #[error("invalid outline")]
    InvalidOutline,
    #[error("invalid composite glyph")]
    InvalidComposite,
    #[error("invalid pixel size")]
    InvalidPixelSize,
    #[error("invalid ppem")]
    InvalidPpem,

    // Bad handle
    #[error("invalid handle")]
    InvalidHandle,
    #[error("invalid library handle")]
    InvalidLibraryHandle,
    #[error("invalid driver handle")]
    InvalidDriverHandle,
    #[error("invalid face handle")]
    InvalidFaceHandle,
    #[error("invalid size handle")]
    InvalidSizeHandle,
    #[error("invalid slot handle")]
    InvalidSlotHandle,
    #[error("invalid charmap handle")]
    InvalidCharmapHandle,
    #[error("invalid cache handle")]
    InvalidCacheHandle,
    #[error("invalid stream handle")]
    InvalidStreamHandle,

    // Format
    #[error("unknown file format")]
    UnknownFileFormat,
    #[error("invalid file format")]
    InvalidFileFormat,
    #[error("invalid version")]
    InvalidVersion,
    #[error("module requires a newer library version")]
    LowerModuleVersion,
    #[error("unimplemented feature")]
    UnimplementedFeature,

    // Stream
    #[error("cannot open resource")]
    CannotOpenResource,
    #[error("cannot open stream")]
    CannotOpenStream,
    #[error("invalid stream seek")]
    InvalidStreamSeek,
    #[error("invalid stream skip")]
    InvalidStreamSkip,
    #[error("invalid stream read")]
    InvalidStreamRead,
    #[error("invalid stream operation")]
    InvalidStreamOperation,
    #[error("invalid frame operation")]
    InvalidFrameOperation,
    #[error("nested frame access")]
    NestedFrameAccess,
    #[error("invalid frame read")]
    InvalidFrameRead,

    // Resource
    #[error("out of memory")]
    OutOfMemory,
    #[error("unlisted object")]
    UnlistedObject,
    #[error("too many drivers registered")]
    TooManyDrivers,
    #[error("too many caches registered")]
    TooManyCaches,
    #[error("too many extensions")]
    TooManyExtensions,

    // Rasterization
    #[error("raster uninitialized")]
    RasterUninitialized,
    #[error("raster corrupted")]
    RasterCorrupted,
    #[error("raster overflow")]
    RasterOverflow,
    #[error("raster negative height")]
    RasterNegativeHeight,
    #[error("cannot render glyph")]
    CannotRenderGlyph,

    // Glyph program
    #[error("stack overflow")]
    StackOverflow,
    #[error("stack underflow")]
    StackUnderflow,
    #[error("code overflow")]
    CodeOverflow,
    #[error("invalid opcode")]
    InvalidOpcode,
    #[error("divide by zero")]
    DivideByZero,
    #[error("invalid reference")]
    InvalidReference,
    #[error("execution took too long")]
    ExecutionTooLong,
    #[error("nested definitions")]
    NestedDefs,
    #[error("syntax error")]
    SyntaxError,
}

/// A `(module, kind)` error, the sole error return type of every entry
/// point in the engine.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("{module}: {kind}")]
pub struct Error {
    pub module: Module,
    pub kind: ErrorKind,
}

impl Error {
    pub const fn new(module: Module, kind: ErrorKind) -> Error {
        Error { module, kind }
    }

    pub fn invalid_argument(module: Module) -> Error {
        Error::new(module, ErrorKind::InvalidArgument)
    }

    pub fn invalid_glyph_index(module: Module) -> Error {
        Error::new(module, ErrorKind::InvalidGlyphIndex)
    }

    pub fn invalid_pixel_size(module: Module) -> Error {
        Error::new(module, ErrorKind::InvalidPixelSize)
    }

    pub fn unimplemented_feature(module: Module) -> Error {
        Error::new(module, ErrorKind::UnimplementedFeature)
    }

    pub fn cannot_render_glyph(module: Module) -> Error {
        Error::new(module, ErrorKind::CannotRenderGlyph)
    }
}

/// Convenience alias used throughout the engine.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_combines_module_and_kind() {
        let e = Error::invalid_glyph_index(Module::TrueType);
        assert_eq!(e.to_string(), "truetype: invalid glyph index");
    }
}
