//! Errors of the flip-disc driver
use thiserror::Error;

use crate::module::ModuleKind;

/// Everything that can go wrong while talking to the chain.
///
/// Pin and SPI errors of the HAL are not kept: their types differ per board and the driver can't
/// do anything useful with them anyway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FlipError {
    /// toggling one of the EN, CH or PL lines failed
    #[error("control pin could not be driven")]
    Pin,

    /// shifting the frame into the chain failed
    #[error("SPI transfer failed")]
    Spi,

    /// an operation was called before init()
    #[error("no module chain declared")]
    NotInitialized,

    #[error("module chain must contain at least one module")]
    ChainEmpty,

    #[error("module chain of {0} modules exceeds the maximum of 8")]
    ChainTooLong(usize),

    /// there is no `index`-th module of this kind in the chain
    #[error("no {kind:?} module with index {index} in the chain")]
    ModuleNotFound { kind: ModuleKind, index: usize },

    #[error("disc {disc} out of range, module has {discs} discs")]
    DiscOutOfRange { disc: usize, discs: usize },

    #[error("{given} glyphs given, but only {available} 7-segment modules in the chain")]
    TooManyGlyphs { given: usize, available: usize },
}

impl FlipError {
    /// Map the result of a pin operation
    pub fn pin<T, E>(result: Result<T, E>) -> Result<T, FlipError> {
        result.map_err(|_| FlipError::Pin)
    }

    /// Map the result of an SPI operation
    pub fn spi<T, E>(result: Result<T, E>) -> Result<T, FlipError> {
        result.map_err(|_| FlipError::Spi)
    }
}
