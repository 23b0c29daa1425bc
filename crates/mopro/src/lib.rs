//! Mopro - compiles a language metamodel into an MDG Technology profile.
//!
//! A design model describes a domain-specific language as packages of UML
//! classes: the abstract syntax (the language's types), the concrete syntax
//! (how each type is drawn) and a small UML baseline the types generalize.
//! Mopro classifies that model and assembles the profile document a modeling
//! tool imports: stereotypes, per-diagram toolboxes, diagram types and
//! embedded rendering scripts.

pub mod classify;
pub mod config;
pub mod payload;
pub mod profile;
pub mod profile_config;
pub mod shapescript;

mod error;

pub use mopro_core::{identifier, model, repository, style};

pub use error::MoproError;

use std::{fs, path::Path};

use log::{debug, info, trace};
use rand::Rng;

use mopro_core::{
    model::Package,
    repository::{InMemoryRepository, ModelRepository},
};

use classify::Classifier;
use config::AppConfig;
use profile::{ProfileDocument, ProfileDocumentBuilder, ProfileIdentity};
use profile_config::ProfileConfig;

/// Stereotype marking a package as a profile root.
pub const PROFILE_STEREOTYPE: &str = "profile";

/// Compiler from design models to profile documents.
///
/// # Examples
///
/// ```rust,no_run
/// use std::path::Path;
/// use mopro::{ProfileCompiler, config::AppConfig, profile_config::ProfileConfig};
///
/// let compiler = ProfileCompiler::new(AppConfig::default());
/// let repository = compiler.load(Path::new("model.toml")).expect("Failed to load");
/// let package = compiler.select_profile_package(&repository).expect("No profile");
/// let document = compiler
///     .compile(&repository, package, &ProfileConfig::default())
///     .expect("Failed to compile");
/// document.save(Path::new(&document.default_file_name())).expect("Failed to save");
/// ```
#[derive(Debug, Default)]
pub struct ProfileCompiler {
    config: AppConfig,
}

impl ProfileCompiler {
    /// Create a compiler with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a model export held in memory.
    ///
    /// # Errors
    ///
    /// Returns [`MoproError::Parse`] with every diagnostic the loader found.
    pub fn parse(&self, source: &str) -> Result<InMemoryRepository, MoproError> {
        info!("Parsing model");
        let repository =
            mopro_parser::parse(source).map_err(|err| MoproError::new_parse_error(err, source))?;
        debug!("Model parsed successfully");
        Ok(repository)
    }

    /// Read and parse a model export. Relative asset paths in the model
    /// resolve against the file's directory.
    pub fn load(&self, path: &Path) -> Result<InMemoryRepository, MoproError> {
        info!(path = path.display().to_string(); "Loading model");
        let source = fs::read_to_string(path)?;
        let mut repository = self.parse(&source)?;
        if let Some(dir) = path.parent() {
            repository.set_base_dir(dir);
        }
        Ok(repository)
    }

    /// Every package stereotyped `profile`, depth-first.
    pub fn profile_packages<'r, R>(&self, repository: &'r R) -> Vec<&'r Package>
    where
        R: ModelRepository + ?Sized,
    {
        repository.packages_with_stereotype(PROFILE_STEREOTYPE)
    }

    /// Choose the profile package to compile.
    ///
    /// A single candidate is taken as is. Among several, the configured
    /// package name decides.
    ///
    /// # Errors
    ///
    /// - [`MoproError::NoProfilePackage`] when the model has no candidate.
    /// - [`MoproError::ProfilePackageNotFound`] when running non-interactively
    ///   and the configured name matches no candidate.
    /// - [`MoproError::AmbiguousProfilePackage`] when the choice is left open.
    pub fn select_profile_package<'r, R>(&self, repository: &'r R) -> Result<&'r Package, MoproError>
    where
        R: ModelRepository + ?Sized,
    {
        let candidates = self.profile_packages(repository);
        let selection = self.config.selection();
        let configured = selection.profile_package();

        let package = match candidates.as_slice() {
            [] => return Err(MoproError::NoProfilePackage),
            [only] => *only,
            _ => match configured.and_then(|name| candidates.iter().find(|p| p.name() == name)) {
                Some(package) => *package,
                None => match configured {
                    Some(name) if selection.non_interactive() => {
                        return Err(MoproError::ProfilePackageNotFound {
                            name: name.to_string(),
                        });
                    }
                    _ => {
                        return Err(MoproError::AmbiguousProfilePackage {
                            candidates: candidates.iter().map(|p| p.name().to_string()).collect(),
                        });
                    }
                },
            },
        };

        info!(profile = package.name(), candidates = candidates.len(); "Profile package selected");
        Ok(package)
    }

    /// Compile `package` into a profile document.
    ///
    /// # Errors
    ///
    /// Fails when the package has no abstract syntax sub-package or the
    /// document cannot be assembled. Nothing is written to disk.
    pub fn compile<R>(
        &self,
        repository: &R,
        package: &Package,
        profile_config: &ProfileConfig,
    ) -> Result<ProfileDocument, MoproError>
    where
        R: ModelRepository + ?Sized,
    {
        self.compile_with_rng(repository, package, profile_config, &mut rand::rng())
    }

    /// [`compile`](Self::compile) with a caller-supplied random source for
    /// generated identities.
    pub fn compile_with_rng<R, G>(
        &self,
        repository: &R,
        package: &Package,
        profile_config: &ProfileConfig,
        rng: &mut G,
    ) -> Result<ProfileDocument, MoproError>
    where
        R: ModelRepository + ?Sized,
        G: Rng,
    {
        info!(profile = package.name(); "Compiling profile");

        let classifier = Classifier::new(repository, package, self.config.classification())?;
        let identity =
            ProfileIdentity::new(package.name(), profile_config, repository.base_dir(), rng);
        let mut builder = ProfileDocumentBuilder::with_rng(identity, rng)?;

        let diagrams = classifier.metamodel_diagrams();
        info!(diagrams = diagrams.len(); "Metamodel diagrams found");

        for diagram in diagrams {
            let classified = classifier.classify_diagram(diagram);
            if classified.is_dsl_diagram() {
                builder.set_diagram_profile_node(classified.name(), classified.diagram_type())?;
            }

            builder.initialize_diagram_toolbox(classified.name())?;
            for element in classified.elements() {
                builder.set_profile_node_elements(element)?;
                builder.set_image_node_elements(element);
                builder.set_toolbox_node_elements(element)?;
            }
            builder.append_diagram_toolbox()?;
            trace!(diagram = classified.name(); "Diagram compiled");
        }

        let document = builder.finish()?;
        info!(technology = document.name(); "Profile compiled");
        Ok(document)
    }
}
