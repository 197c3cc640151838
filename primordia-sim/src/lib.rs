//! Primordia Mission Engine
//!
//! Platform-agnostic core of the Primordia capture-mission simulator: the
//! transit and engagement phases, the supporting static data (armament,
//! countermeasures, travel events), and the pre-mission target scorer. The
//! surrounding catalog tool provides record storage, maps, and UI; this
//! crate provides only the simulation, against injected collaborators.

pub mod archive;
pub mod catalog;
pub mod constants;
pub mod countermeasures;
pub mod driver;
pub mod drone;
pub mod encounter;
pub mod events;
pub mod geo;
pub mod log;
pub mod mission;
pub mod numbers;
pub mod rng;
pub mod scorer;
pub mod transit;
pub mod weapons;

// Re-export commonly used types
pub use archive::{MemoryArchive, MissionArchive, MissionRecord};
pub use catalog::{
    BaseRecord, DormancyStatus, Location, Power, PowerRarity, PowerType, TargetRecord,
    TerrainDifficulty,
};
pub use countermeasures::{bucket_label, countermeasure_pair};
pub use driver::{DriverSignal, MissionDriver, OperatorCommand};
pub use drone::{DroneStats, Loadout, SupportDrone};
pub use encounter::{
    ActionOutcome, BodyLocation, CaptureMethod, DroneAction, DuckState, DuckTurnOutcome,
    EncounterDormancy, EngagementState, Side, WeakPoint, WeaknessTier,
};
pub use events::{EventOption, StatDelta, StatKind, TRANSIT_EVENTS, TransitEvent};
pub use log::MissionLog;
pub use mission::{
    MissionConfigError, MissionError, MissionOutcome, MissionPhaseKind, MissionPlan,
    MissionSession, MissionStatus,
};
pub use rng::RngBundle;
pub use scorer::{
    CostTier, DifficultyTier, RiskTier, ScorePoints, TargetAssessment, ValueTier, assess,
};
pub use transit::{TransitError, TransitPhase, TransitTickOutcome};
pub use weapons::{ARSENAL, BASELINE_LASER_ID, WeaponSpec, special_weapons, weapon_by_id};

/// Engine binding a Mission Archive implementation to mission construction.
///
/// One engine serves the whole catalog tool; each launched mission gets its
/// own seeded session and driver.
pub struct MissionEngine<A>
where
    A: MissionArchive + Clone,
{
    archive: A,
}

impl<A> MissionEngine<A>
where
    A: MissionArchive + Clone,
{
    /// Create an engine over the given archive collaborator.
    pub const fn new(archive: A) -> Self {
        Self { archive }
    }

    /// Rank a target against a launch base before committing to a mission.
    #[must_use]
    pub fn assess(&self, target: &TargetRecord, base: &BaseRecord) -> TargetAssessment {
        scorer::assess(target, base)
    }

    /// Validate a plan and launch a driven mission session.
    ///
    /// # Errors
    ///
    /// Returns a [`MissionConfigError`] when the plan violates a launch
    /// precondition.
    pub fn launch(
        &self,
        plan: MissionPlan,
        seed: u64,
        now_ms: u64,
    ) -> Result<MissionDriver<A>, MissionConfigError> {
        let session = MissionSession::launch(plan, seed, now_ms)?;
        Ok(MissionDriver::new(session, self.archive.clone(), now_ms))
    }
}
