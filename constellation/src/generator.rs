//! Rejection-sampling driver.
//!
//! Each attempt walks `Sampling -> ValidatingInternal -> ValidatingExternal ->
//! Committed`, falling back to `Sampling` on any rejection. Nothing from a
//! rejected attempt is kept. Committing appends the constellation to the sink
//! first and only then merges its signatures into the corpus, so a failed
//! write leaves the corpus untouched.

use std::path::Path;

use glam::DVec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use crate::builder::ConstellationBuilder;
use crate::config::{BodyLayout, FaceKind, GeneratorConfig};
use crate::constellation::{Constellation, POINT_COUNT};
use crate::corpus::Corpus;
use crate::error::GenerateError;
use crate::pair::PairSet;
use crate::segment::SegmentSet;
use crate::store::{ConstellationSink, CsvStore};
use crate::validator::{ExternalViolation, InternalViolation, Tolerances, UniquenessValidator};

/// Outcome of validating one candidate point set.
#[derive(Debug, Clone, PartialEq)]
pub enum Attempt {
    RejectedInternal(InternalViolation),
    RejectedExternal(ExternalViolation),
    Accepted { segments: SegmentSet, pairs: PairSet },
}

impl Attempt {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Attempt::Accepted { .. })
    }
}

/// Rejection counters for a single face.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttemptStats {
    pub attempts: usize,
    pub internal_rejections: usize,
    pub external_rejections: usize,
}

/// Owns the corpus and the random source for one run.
#[derive(Debug)]
pub struct Generator {
    validator: UniquenessValidator,
    corpus: Corpus,
    rng: ChaCha8Rng,
    max_attempts: usize,
}

impl Generator {
    pub fn new(corpus: Corpus, tolerances: Tolerances, max_attempts: usize, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_os_rng(),
        };
        Self {
            validator: UniquenessValidator::new(tolerances),
            corpus,
            rng,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Validates `config` and builds a generator over `corpus`.
    pub fn from_config(config: &GeneratorConfig, corpus: Corpus) -> Result<Self, GenerateError> {
        config.validate()?;
        Ok(Self::new(
            corpus,
            config.tolerances,
            config.max_attempts,
            config.seed,
        ))
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn validator(&self) -> &UniquenessValidator {
        &self.validator
    }

    /// Runs both acceptance checks on a candidate against the live corpus.
    /// Pure: the same points and corpus always give the same outcome.
    pub fn evaluate(&self, points: &[DVec3; POINT_COUNT]) -> Attempt {
        let segments = SegmentSet::compute(points);
        if let Err(violation) = self.validator.check_internal(&segments) {
            return Attempt::RejectedInternal(violation);
        }
        let pairs = PairSet::compute(&segments);
        if let Err(violation) = self.validator.check_external(&pairs, &self.corpus) {
            return Attempt::RejectedExternal(violation);
        }
        Attempt::Accepted { segments, pairs }
    }

    /// Samples from `builder` until a candidate is accepted, then commits it
    /// under `name`. Malformed regions fail with [`GenerateError::Config`]
    /// before any sampling; otherwise gives up with
    /// [`GenerateError::RegionInfeasible`] after `max_attempts` rejections.
    pub fn generate_face<S: ConstellationSink>(
        &mut self,
        name: String,
        builder: &ConstellationBuilder,
        sink: &mut S,
    ) -> Result<Constellation, GenerateError> {
        builder.validate()?;
        let mut stats = AttemptStats::default();

        while stats.attempts < self.max_attempts {
            stats.attempts += 1;
            let points = builder.build(&mut self.rng);

            match self.evaluate(&points) {
                Attempt::RejectedInternal(violation) => {
                    stats.internal_rejections += 1;
                    debug!("{}: attempt {} rejected: {}", name, stats.attempts, violation);
                }
                Attempt::RejectedExternal(violation) => {
                    stats.external_rejections += 1;
                    debug!("{}: attempt {} rejected: {}", name, stats.attempts, violation);
                }
                Attempt::Accepted { pairs, .. } => {
                    let constellation = Constellation::new(name, points);
                    self.commit(&constellation, pairs, sink)?;
                    info!(
                        "Accepted '{}' after {} attempts ({} internal, {} external rejections)",
                        constellation.name(),
                        stats.attempts,
                        stats.internal_rejections,
                        stats.external_rejections
                    );
                    return Ok(constellation);
                }
            }
        }

        warn!(
            "Giving up on '{}' after {} attempts ({} internal, {} external rejections)",
            name, stats.attempts, stats.internal_rejections, stats.external_rejections
        );
        Err(GenerateError::RegionInfeasible {
            name,
            attempts: stats.attempts,
            internal_rejections: stats.internal_rejections,
            external_rejections: stats.external_rejections,
        })
    }

    fn commit<S: ConstellationSink>(
        &mut self,
        constellation: &Constellation,
        pairs: PairSet,
        sink: &mut S,
    ) -> Result<(), GenerateError> {
        sink.append(constellation)?;
        self.corpus.commit(constellation.name(), pairs);
        Ok(())
    }

    /// Generates every face of body number `index` (1-based). In two-face
    /// layouts the bottom face is validated against a corpus that already
    /// holds the top face. A top face is not rolled back when its bottom
    /// face fails.
    pub fn generate_body<S: ConstellationSink>(
        &mut self,
        layout: &BodyLayout,
        base_name: &str,
        index: usize,
        sink: &mut S,
    ) -> Result<Vec<Constellation>, GenerateError> {
        match layout {
            BodyLayout::SingleFace { points } => {
                let builder = ConstellationBuilder::new(*points);
                let face =
                    self.generate_face(FaceKind::Single.face_name(base_name, index), &builder, sink)?;
                Ok(vec![face])
            }
            BodyLayout::TwoFace { top, bottom, links } => {
                let top_builder = ConstellationBuilder::new(*top);
                let top_face =
                    self.generate_face(FaceKind::Top.face_name(base_name, index), &top_builder, sink)?;

                let bottom_builder = ConstellationBuilder::linked(&top_face, *links, *bottom);
                let bottom_face = self
                    .generate_face(
                        FaceKind::Bottom.face_name(base_name, index),
                        &bottom_builder,
                        sink,
                    )
                    .inspect_err(|_| {
                        warn!(
                            "'{}' stays committed without a bottom face",
                            top_face.name()
                        )
                    })?;
                Ok(vec![top_face, bottom_face])
            }
        }
    }

    /// Generates `config.num_arrays` bodies, returning every committed face in
    /// commit order.
    pub fn run<S: ConstellationSink>(
        &mut self,
        config: &GeneratorConfig,
        sink: &mut S,
    ) -> Result<Vec<Constellation>, GenerateError> {
        let mut generated = Vec::with_capacity(config.num_arrays * config.layout.face_count());
        for index in 1..=config.num_arrays {
            generated.extend(self.generate_body(&config.layout, &config.base_name, index, sink)?);
        }
        Ok(generated)
    }
}

/// Loads the store at `path`, seeds the corpus from it and appends a full
/// run of new constellations to it.
pub fn generate_into_store(
    config: &GeneratorConfig,
    path: &Path,
) -> Result<Vec<Constellation>, GenerateError> {
    config.validate()?;

    let mut store = CsvStore::new(path);
    let existing = store.load()?;
    let corpus = Corpus::from_constellations(&existing);
    info!(
        "Loaded {} constellations ({} signatures) from {}",
        corpus.face_count(),
        corpus.len(),
        path.display()
    );

    let mut generator = Generator::from_config(config, corpus)?;
    generator.run(config, &mut store)
}
