use crate::generator::{
  artifacts::{
    ArtifactBundle, ArtifactContext, ArtifactGenerator, dao::DaoGenerator, database::DatabaseGenerator,
    domain::DomainGenerator, entities::EntityGenerator, enums::EnumGenerator, map_helpers::MapHelperGenerator, mappers::MapperGenerator,
    sync_dto::SyncDtoGenerator, triggers::TriggerGenerator,
  },
  config::GeneratorConfig,
  errors::ResolveError,
  links::synthesize_links,
  metrics::{GenerationStats, GenerationWarning},
  model::ResolvedModel,
  naming::NamingResolver,
  normalizer::Normalizer,
  resolver::resolve_references,
  schema::RawDocument,
  traversal::ModelPlan,
};

#[derive(Debug, Clone)]
pub struct GenerationOutput {
  pub bundle: ArtifactBundle,
  pub stats: GenerationStats,
}

#[derive(Debug, Clone)]
pub struct ResolvedOutput {
  pub model: ResolvedModel,
  pub warnings: Vec<GenerationWarning>,
}

/// Runs the pipeline: resolve references, normalize, synthesize links, then hand an
/// immutable model to every selected generator.
#[derive(Debug, Clone)]
pub struct Orchestrator {
  document: RawDocument,
  config: GeneratorConfig,
  naming: NamingResolver,
  tracked: Vec<GenerationWarning>,
}

impl Orchestrator {
  pub fn new(document: RawDocument, config: GeneratorConfig) -> Self {
    Self {
      document,
      config,
      naming: NamingResolver::default(),
      tracked: vec![],
    }
  }

  /// Carries failures that were reported before generation started, e.g. during loading.
  #[must_use]
  pub fn with_tracked_warnings(mut self, warnings: Vec<GenerationWarning>) -> Self {
    self.tracked = warnings;
    self
  }

  pub(crate) fn naming(&self) -> NamingResolver {
    self.naming
  }

  /// Builds the resolved model. An empty document yields an empty model.
  pub fn resolve(&self) -> Result<ResolvedOutput, ResolveError> {
    let root = self.config.root_entity.as_str();
    if self.document.is_empty() {
      return Ok(ResolvedOutput {
        model: ResolvedModel::empty(root),
        warnings: vec![],
      });
    }

    let reachable = resolve_references(root, &self.document)?;
    let normalized = Normalizer::new(&self.document, self.naming).normalize(&reachable);
    let (links, link_warnings) = synthesize_links(&normalized.entities, self.naming);

    let mut warnings = normalized.warnings;
    warnings.extend(link_warnings);

    Ok(ResolvedOutput {
      model: ResolvedModel::new(root, normalized.entities, links, normalized.enums),
      warnings,
    })
  }

  pub fn generate(&self) -> anyhow::Result<GenerationOutput> {
    let ResolvedOutput { model, warnings } = self.resolve()?;
    let plan = ModelPlan::build(&model, self.naming);
    let context = ArtifactContext::from_config(&self.config);

    let generators: Vec<Box<dyn ArtifactGenerator + '_>> = vec![
      Box::new(SyncDtoGenerator::new(&context)),
      Box::new(EntityGenerator::new(&context)),
      Box::new(DaoGenerator::new(&context)),
      Box::new(DatabaseGenerator::new(&context)),
      Box::new(MapperGenerator::new(&context)),
      Box::new(MapHelperGenerator::new(&context)),
      Box::new(EnumGenerator::new(&context)),
      Box::new(TriggerGenerator::new(&context)),
      Box::new(DomainGenerator::new(&context)),
    ];

    let mut bundle = ArtifactBundle::default();
    for generator in generators.iter().filter(|generator| self.config.wants(generator.kind())) {
      generator.contribute(&plan, &mut bundle);
    }

    let mut stats = GenerationStats {
      definitions_total: self.document.definitions.len(),
      entities_resolved: model.entities().count(),
      enums_collected: model.enums().len(),
      links_synthesized: model.links().count(),
      persisted_entities: plan.persisted().count(),
      foreign_keys: plan.persisted().map(|entity| entity.foreign_keys().count()).sum(),
      ..GenerationStats::default()
    };
    stats.record_bundle(&bundle);
    stats.record_warnings(self.tracked.iter().cloned());
    stats.record_warnings(warnings);
    stats.record_warnings(plan.warnings().iter().cloned());

    Ok(GenerationOutput { bundle, stats })
  }
}
