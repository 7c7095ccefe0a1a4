//! Error types for the topiary core library.
//!
//! Defines the error enum exposed by the public API, its stable error codes,
//! and a convenient result alias.

use std::{fmt, sync::Arc};

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Error type produced when configuring or running [`crate::TopicTree`].
///
/// Structural oddities in a merge table (unknown names, missing distances,
/// dangling children) are resolved with fallbacks and never surface here.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum TopicTreeError {
    /// The merge table contained no records, so no root can be determined.
    #[error("merge table `{table}` contains no records")]
    EmptyInput {
        /// Name of the empty merge table.
        table: Arc<str>,
    },
    /// The configured pruning threshold was not a number.
    #[error("max_distance must be a number (got {got})")]
    InvalidMaxDistance {
        /// The rejected threshold.
        got: f64,
    },
}

define_error_codes! {
    /// Stable codes describing [`TopicTreeError`] variants.
    enum TopicTreeErrorCode for TopicTreeError {
        /// The merge table contained no records.
        EmptyInput => EmptyInput { .. } => "TOPIARY_EMPTY_INPUT",
        /// The configured pruning threshold was not a number.
        InvalidMaxDistance => InvalidMaxDistance { .. } => "TOPIARY_INVALID_MAX_DISTANCE",
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, TopicTreeError>;
