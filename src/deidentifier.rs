use std::collections::{BTreeSet, HashMap};

use anyhow::Result;
use tracing::{debug, warn};

use crate::config::{DateConfig, SurrogateConfig, DEFAULT_SEED};
use crate::document::{DocumentSurrogates, SurrogateDocument};
use crate::error::DocumentError;
use crate::generators::{GeneratorFactory, IdentityGenerator, SurrogateGenerator, TagGeneratorRegistry};
use crate::random::RandomData;
use crate::reference::ReferenceData;

/// Generates surrogates for a whole dataset.
///
/// Tags without a registered generator are shuffled among the values the same tag has in other
/// documents. Each document draws from its own stream derived from the dataset seed.
pub struct DatasetDeidentifier {
    seed: u64,
    reference: ReferenceData,
    date_config: DateConfig,
    registry: TagGeneratorRegistry,
}

impl Default for DatasetDeidentifier {
    fn default() -> Self {
        Self::new(DEFAULT_SEED, ReferenceData::builtin())
    }
}

impl DatasetDeidentifier {
    pub fn new(seed: u64, reference: ReferenceData) -> Self {
        Self {
            seed,
            reference,
            date_config: DateConfig::default(),
            registry: TagGeneratorRegistry::default(),
        }
    }

    pub fn from_config(config: &SurrogateConfig) -> Result<Self> {
        config.validate()?;
        let reference = config.load_reference_data()?;

        Ok(Self {
            seed: config.seed,
            reference,
            date_config: config.date.clone(),
            registry: TagGeneratorRegistry::with_overrides(&config.tag_generators),
        })
    }

    pub fn with_registry(mut self, registry: TagGeneratorRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_date_config(mut self, date_config: DateConfig) -> Self {
        self.date_config = date_config;
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn generate_surrogates(
        &self,
        documents: Vec<SurrogateDocument>,
    ) -> Result<Vec<DocumentSurrogates>, DocumentError> {
        let pools = tag_pools(&documents);

        documents
            .into_iter()
            .enumerate()
            .map(|(index, document)| self.document_surrogates(index, document, &pools))
            .collect()
    }

    fn document_surrogates(
        &self,
        index: usize,
        document: SurrogateDocument,
        pools: &HashMap<String, BTreeSet<String>>,
    ) -> Result<DocumentSurrogates, DocumentError> {
        let mut random = RandomData::for_document(self.seed, index);
        let factory = GeneratorFactory::new(&self.reference, &self.date_config, &mut random);

        let mut batches = Vec::with_capacity(document.tags().len());
        for tag in document.tags() {
            let values = document.annotations_text(tag);

            let generator: Box<dyn SurrogateGenerator + '_> = match self.registry.generator_for_tag(tag) {
                Some(kind) => factory.build(kind),
                None => {
                    let own: BTreeSet<&str> = values.iter().copied().collect();
                    let choices: Vec<String> = pools
                        .get(tag)
                        .into_iter()
                        .flatten()
                        .filter(|value| !own.contains(value.as_str()))
                        .cloned()
                        .collect();

                    if choices.is_empty() {
                        warn!(
                            tag = %tag,
                            document = document.name(),
                            "no values of this tag in other documents, keeping originals"
                        );
                        Box::new(IdentityGenerator)
                    } else {
                        factory.shuffle_generator(choices)
                    }
                }
            };

            let surrogates = generator.replace_all(&values, &mut random);
            let failed = surrogates.iter().filter(|s| s.is_none()).count();
            if failed > 0 {
                debug!(
                    tag = %tag,
                    document = document.name(),
                    failed,
                    total = surrogates.len(),
                    "annotations without surrogate"
                );
            }
            batches.push((tag.clone(), surrogates));
        }

        batches
            .into_iter()
            .try_fold(DocumentSurrogates::new(document), |acc, (tag, surrogates)| {
                acc.with_surrogates(&tag, surrogates)
            })
    }
}

/// Distinct values of every tag across all documents.
fn tag_pools(documents: &[SurrogateDocument]) -> HashMap<String, BTreeSet<String>> {
    let mut pools: HashMap<String, BTreeSet<String>> = HashMap::new();
    for document in documents {
        for tag in document.tags() {
            pools
                .entry(tag.clone())
                .or_default()
                .extend(document.annotations_text(tag).into_iter().map(String::from));
        }
    }
    pools
}
