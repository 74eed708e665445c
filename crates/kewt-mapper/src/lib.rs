//! Mapping resolution for kewt.
//!
//! Given a declared mapping function, its converter pool and a property
//! resolver, infer which source expression feeds each target field.
//!
//! - [`conversion`]: how a value of one type becomes another ([`TypeMatcher`])
//! - [`normalize`]: user directives into name mappings and pinned converters
//! - [`engine`]: the phased matching algorithm ([`calculate_mappings`])
//! - [`function`]: per-function analysis ([`FunctionAnalyzer`])

pub mod conversion;
pub mod engine;
pub mod function;
pub mod normalize;

pub use conversion::{TypeMatcher, is_assignable};
pub use engine::{MappingRequest, calculate_mappings};
pub use function::{DEFAULT_MAX_LIFT_DEPTH, FunctionAnalyzer, FunctionDecl, FunctionParameterDecl};
pub use normalize::{MappingDirective, NormalizedDirectives, normalize_directives};
