//! Analysis of one declared mapping function.
//!
//! [`FunctionAnalyzer`] turns a [`FunctionDecl`] into a [`MappedFunction`]:
//!
//! 1. validate the merge-target parameter, if any
//! 2. normalize the mapping directives
//! 3. collect sources: direct properties, whole parameters and the lifted
//!    paths named by directives
//! 4. resolve the return type into target fields
//! 5. run the mapping engine
//!
//! # Example
//!
//! ```
//! use kewt_core::TypeRef;
//! use kewt_mapper::{FunctionAnalyzer, FunctionDecl, TypeMatcher};
//! use kewt_registry::{AliasRegistry, SchemaRegistry, TypeSchema};
//!
//! let mut schemas = SchemaRegistry::with_builtins();
//! let person = TypeSchema::new().property("name", TypeRef::new("kotlin.String"));
//! schemas.register("com.acme.Person", person.clone()).unwrap();
//! schemas.register("com.acme.PersonDto", person).unwrap();
//!
//! let aliases = AliasRegistry::with_defaults();
//! let analyzer = FunctionAnalyzer::new(&schemas, TypeMatcher::new(&aliases, &[]));
//!
//! let decl = FunctionDecl::new("toDto", TypeRef::new("com.acme.PersonDto"))
//!     .param("person", TypeRef::new("com.acme.Person"));
//! let mapped = analyzer.analyze(&decl).unwrap();
//! assert_eq!(mapped.mapping_for("name").unwrap().source.selector(), "person.name");
//! ```

use tracing::{debug, error};

use kewt_core::{
    ConfigurationError, ConversionFunction, MappedFunction, MappingError, NameMapping, Parameter,
    ResolveError, Source, TypeRef,
};
use kewt_registry::PropertyResolver;

use crate::conversion::TypeMatcher;
use crate::engine::{MappingRequest, calculate_mappings};
use crate::normalize::{MappingDirective, NormalizedDirectives, normalize_directives};

/// Default bound on lifted path length.
pub const DEFAULT_MAX_LIFT_DEPTH: usize = 8;

/// A parameter of a declared function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionParameterDecl {
    pub name: String,
    pub ty: TypeRef,
    /// Existing instance whose fields back absent source values.
    pub is_merge_target: bool,
}

impl FunctionParameterDecl {
    pub fn to_parameter(&self) -> Parameter {
        Parameter::new(self.name.clone(), self.ty.clone())
    }
}

/// A function declared on a mapper unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDecl {
    pub name: String,
    pub parameters: Vec<FunctionParameterDecl>,
    pub return_type: TypeRef,
    pub directives: Vec<MappingDirective>,
    /// Abstract functions are the ones whose body gets generated.
    pub is_abstract: bool,
    pub is_member_style: bool,
}

impl FunctionDecl {
    /// An abstract function with no parameters or directives yet.
    pub fn new(name: impl Into<String>, return_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            return_type,
            directives: Vec::new(),
            is_abstract: true,
            is_member_style: false,
        }
    }

    #[must_use]
    pub fn param(mut self, name: impl Into<String>, ty: TypeRef) -> Self {
        self.parameters.push(FunctionParameterDecl {
            name: name.into(),
            ty,
            is_merge_target: false,
        });
        self
    }

    #[must_use]
    pub fn merge_target(mut self, name: impl Into<String>, ty: TypeRef) -> Self {
        self.parameters.push(FunctionParameterDecl {
            name: name.into(),
            ty,
            is_merge_target: true,
        });
        self
    }

    #[must_use]
    pub fn directive(mut self, directive: MappingDirective) -> Self {
        self.directives.push(directive);
        self
    }

    /// Mark as a hand-written helper rather than a generated mapping.
    #[must_use]
    pub fn concrete(mut self) -> Self {
        self.is_abstract = false;
        self
    }

    #[must_use]
    pub fn member_style(mut self) -> Self {
        self.is_member_style = true;
        self
    }

    /// This function as a converter, if it takes exactly one parameter.
    pub fn as_conversion_function(&self) -> Option<ConversionFunction> {
        match self.parameters.as_slice() {
            [single] => {
                let function = ConversionFunction::new(
                    self.name.clone(),
                    single.to_parameter(),
                    self.return_type.clone(),
                );
                Some(if self.is_member_style {
                    function.member_style()
                } else {
                    function
                })
            }
            _ => None,
        }
    }

    fn source_parameters(&self) -> Vec<Parameter> {
        self.parameters
            .iter()
            .filter(|p| !p.is_merge_target)
            .map(FunctionParameterDecl::to_parameter)
            .collect()
    }
}

/// Analyzes declared functions against a property resolver and a converter pool.
pub struct FunctionAnalyzer<'a, R: ?Sized> {
    resolver: &'a R,
    matcher: TypeMatcher<'a>,
    max_lift_depth: usize,
}

impl<'a, R: PropertyResolver + ?Sized> FunctionAnalyzer<'a, R> {
    pub fn new(resolver: &'a R, matcher: TypeMatcher<'a>) -> Self {
        Self {
            resolver,
            matcher,
            max_lift_depth: DEFAULT_MAX_LIFT_DEPTH,
        }
    }

    #[must_use]
    pub fn with_max_lift_depth(mut self, max_lift_depth: usize) -> Self {
        self.max_lift_depth = max_lift_depth;
        self
    }

    /// Resolve every target field of `decl`.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn analyze(&self, decl: &FunctionDecl) -> Result<MappedFunction, MappingError> {
        debug!(function = %decl.name, "analyzing mapping function");

        let merge_target = self.merge_target(decl)?;
        let source_parameters = decl.source_parameters();
        let NormalizedDirectives {
            name_mappings,
            explicit_converters,
        } = normalize_directives(&source_parameters, &decl.directives)?;

        let sources = self.collect_sources(&source_parameters, &name_mappings)?;
        let return_type = self.resolver.resolve(&decl.return_type)?;

        let request = MappingRequest::new(sources, return_type.parameters())
            .with_name_mappings(name_mappings)
            .with_explicit_converters(explicit_converters)
            .with_defaults(return_type.defaulted());

        let mappings = match calculate_mappings(&request, &self.matcher) {
            Ok(mappings) => mappings,
            Err(err @ MappingError::Unresolved(_)) => {
                self.log_unresolved(decl, &request, &err);
                return Err(err);
            }
            Err(err) => return Err(err),
        };
        debug!(function = %decl.name, mappings = mappings.len(), "inferred mappings");

        Ok(MappedFunction {
            name: decl.name.clone(),
            parameters: decl.parameters.iter().map(FunctionParameterDecl::to_parameter).collect(),
            return_type,
            mappings,
            merge_target,
        })
    }

    fn merge_target(&self, decl: &FunctionDecl) -> Result<Option<String>, ConfigurationError> {
        let marked: Vec<&FunctionParameterDecl> =
            decl.parameters.iter().filter(|p| p.is_merge_target).collect();
        match marked.as_slice() {
            [] => Ok(None),
            [target] if target.ty.name == decl.return_type.name => Ok(Some(target.name.clone())),
            [target] => Err(ConfigurationError::MergeTargetTypeMismatch {
                parameter: target.to_parameter(),
                return_type: decl.return_type.clone(),
            }),
            _ => Err(ConfigurationError::MultipleMergeTargets {
                parameters: marked.iter().map(|p| p.name.clone()).collect(),
            }),
        }
    }

    fn collect_sources(
        &self,
        parameters: &[Parameter],
        name_mappings: &[NameMapping],
    ) -> Result<Vec<Source>, MappingError> {
        let mut sources = Vec::new();
        for parameter in parameters {
            let resolved = self.resolver.resolve(&parameter.ty)?;
            sources.extend(
                resolved
                    .properties
                    .iter()
                    .map(|p| Source::property(&parameter.name, &p.name, p.ty.clone())),
            );

            for mapping in name_mappings
                .iter()
                .filter(|m| m.parameter_name == parameter.name && m.source_path.len() > 1)
            {
                if let Some(lifted) = self.lift(parameter, mapping)?
                    && !sources.contains(&lifted)
                {
                    sources.push(lifted);
                }
            }
        }
        sources.extend(
            parameters
                .iter()
                .map(|p| Source::parameter(&p.name, p.ty.clone())),
        );
        Ok(sources)
    }

    /// Source reached through the nested path of `mapping`.
    ///
    /// Paths that do not resolve are left for validation to report.
    fn lift(
        &self,
        parameter: &Parameter,
        mapping: &NameMapping,
    ) -> Result<Option<Source>, MappingError> {
        let depth = mapping.source_path.len();
        if depth > self.max_lift_depth {
            return Err(ConfigurationError::LiftDepthExceeded {
                selector: mapping.selector(),
                depth,
                max: self.max_lift_depth,
            }
            .into());
        }

        match self.resolver.property_type_at(&parameter.ty, &mapping.source_path) {
            Ok(Some(ty)) => Ok(Some(Source::new(
                &parameter.name,
                mapping.source_path.clone(),
                ty,
            ))),
            Ok(None) | Err(ResolveError::UnknownType(_)) => {
                debug!(selector = %mapping.selector(), "lifted path does not resolve");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn log_unresolved(&self, decl: &FunctionDecl, request: &MappingRequest, err: &MappingError) {
        error!(
            function = %decl.name,
            "{err}\nsources=[\n    {}\n]\ntargets=[\n    {}\n]\nnameMappings=[\n    {}\n]\nexplicitConverters=[\n    {}\n]\nconversionFunctions=[\n    {}\n]",
            dump(&request.sources),
            dump(&request.targets),
            dump(&request.name_mappings),
            dump(&request.explicit_converters),
            dump(self.matcher.functions()),
        );
    }
}

fn dump<T: std::fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",\n    ")
}
