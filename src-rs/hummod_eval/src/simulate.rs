//! The time-stepped simulation driver.

use indexmap::{IndexMap, IndexSet};
use tracing::{debug, trace, warn};

use crate::{
    client::Client, config::SimulationConfig, error::SimulationError, loader::ModuleLoader,
    resolve, value::Value,
};

/// The numeric results of one simulation step, keyed `Module.Name`.
pub type StepRecord = IndexMap<String, f64>;

/// Runs `floor(duration / timestep)` steps and returns one record per step.
pub fn run<L: ModuleLoader>(
    client: &mut Client<L>,
    config: SimulationConfig,
    mut perturb: Option<&mut dyn FnMut(&mut Client<L>, usize)>,
) -> Result<Vec<StepRecord>, SimulationError> {
    let SimulationConfig { duration, timestep } = config;

    if !timestep.is_finite() || timestep <= 0.0 {
        return Err(SimulationError::InvalidTimestep(timestep));
    }
    if !duration.is_finite() || duration < 0.0 {
        return Err(SimulationError::InvalidDuration(duration));
    }

    let steps = step_count(duration, timestep)
        .ok_or(SimulationError::TooManySteps { duration, timestep })?;
    client.set_dt(timestep);
    debug!(steps, duration, timestep, "starting simulation");

    let mut records = Vec::new();
    for step in 0..steps {
        trace!(step, "simulation step");
        client.clear_call_log();

        if let Some(perturb) = perturb.as_mut() {
            perturb(client, step);
        }

        records.push(evaluate_all(client));
    }

    debug!(steps, "simulation complete");
    Ok(records)
}

/// Returns `None` when the step count does not fit in a `usize`.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    reason = "the ratio is non-negative and checked against the usize range before the cast"
)]
fn step_count(duration: f64, timestep: f64) -> Option<usize> {
    let steps = (duration / timestep).floor();
    if steps.is_finite() && steps < usize::MAX as f64 {
        Some(steps as usize)
    } else {
        None
    }
}

/// Evaluates every variable and top-level definition of the modules loaded
/// at the start of the step.
fn evaluate_all<L: ModuleLoader>(client: &mut Client<L>) -> StepRecord {
    let mut record = StepRecord::new();

    for index in 0..client.loaded_count() {
        let module = client.module_at(index);
        let module_name = module.name().to_string();
        let model = module.shared_model();

        let names: IndexSet<&str> = model
            .variables()
            .keys()
            .chain(model.definitions().entries().keys())
            .map(String::as_str)
            .collect();

        for name in names {
            match resolve::get(client, index, name) {
                Ok(Value::Number(number)) => {
                    record.insert(format!("{module_name}.{name}"), number);
                }
                Ok(Value::Text(_) | Value::Executed | Value::Function(_) | Value::NoValue) => {}
                Err(error) => {
                    warn!(module = %module_name, name, %error, "skipping name that failed to evaluate");
                }
            }
        }
    }

    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{loader::SourceMap, test};

    #[test]
    fn ten_steps_of_numeric_records() {
        let mut client = test::client();
        client.module("Heart").expect("should load");
        client.module("Valve").expect("should load");

        let records = client.simulate(10.0, 1.0, None).expect("should simulate");

        assert_eq!(records.len(), 10);
        for record in &records {
            assert_eq!(record.get("Heart.Rate"), Some(&72.0));
            assert_eq!(record.get("Valve.Conductance"), Some(&0.5));
            assert_eq!(record.get("Valve.Effect"), Some(&1.0));
            assert!(!record.contains_key("Heart.Label"));
            assert!(!record.contains_key("Heart.Pump"));
            assert!(!record.contains_key("Valve.Flow"));
            assert!(!record.contains_key("Valve.Area"));
            assert!(record.keys().all(|key| key.split('.').count() == 2));
        }
    }

    #[test]
    fn perturbation_installs_overrides() {
        let mut client = test::client();
        client.module("Valve").expect("should load");

        let mut perturb = |client: &mut Client<SourceMap>, step: usize| {
            let area = if step % 2 == 0 { 0.0 } else { 3.3 };
            client.module("Valve").expect("should load").set("Area", area);
        };
        let records = client
            .simulate(4.0, 1.0, Some(&mut perturb))
            .expect("should simulate");

        let effects: Vec<f64> = records
            .iter()
            .map(|record| record["Valve.Effect"])
            .collect();
        assert_eq!(effects, vec![1.0, 0.0, 1.0, 0.0]);
        assert_eq!(records[1].get("Valve.Area"), Some(&3.3));
    }

    #[test]
    fn modules_loaded_by_perturbation_are_recorded() {
        let mut client = test::client();

        let mut perturb = |client: &mut Client<SourceMap>, _step: usize| {
            client.module("Lungs").expect("should load");
        };
        let records = client
            .simulate(2.0, 1.0, Some(&mut perturb))
            .expect("should simulate");

        assert_eq!(records[0].get("Lungs.Tidal"), Some(&0.5));
    }

    #[test]
    fn failures_are_skipped_and_calls_logged_per_step() {
        let mut client = test::client();
        client.module("Circulation").expect("should load");

        let records = client.simulate(3.0, 1.0, None).expect("should simulate");

        assert_eq!(records.len(), 3);
        assert_eq!(records[2].get("Circulation.Base"), Some(&2.0));
        assert!(records[2].contains_key("Circulation.Tone"));
        assert!(!records[2].contains_key("Circulation.Beat"));
        assert!(!records[2].contains_key("Circulation.Broken"));

        let pumps = client
            .call_log()
            .iter()
            .filter(|call| call.to_string() == "Heart.Pump")
            .count();
        assert_eq!(pumps, 2);
    }

    #[test]
    fn step_count_and_dt() {
        let mut client = test::client();

        let records = client.simulate(2.5, 0.5, None).expect("should simulate");
        assert_eq!(records.len(), 5);
        assert_eq!(client.dt(), 0.5);

        let records = client.simulate(0.9, 1.0, None).expect("should simulate");
        assert!(records.is_empty());

        let records = client
            .simulate_with_config(SimulationConfig::default(), None)
            .expect("should simulate");
        assert_eq!(records.len(), 10);
    }

    #[test]
    fn invalid_parameters() {
        let mut client = test::client();

        for timestep in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                client.simulate(10.0, timestep, None),
                Err(SimulationError::InvalidTimestep(_))
            ));
        }
        assert_eq!(
            client.simulate(-1.0, 1.0, None),
            Err(SimulationError::InvalidDuration(-1.0))
        );
    }

    #[test]
    fn step_count_out_of_range() {
        let mut client = test::client();

        assert_eq!(
            client.simulate(1e30, 1e-30, None),
            Err(SimulationError::TooManySteps {
                duration: 1e30,
                timestep: 1e-30
            })
        );
        assert!(matches!(
            client.simulate(f64::MAX, f64::MIN_POSITIVE, None),
            Err(SimulationError::TooManySteps { .. })
        ));
        assert_eq!(step_count(0.0, 1e-300), Some(0));
        assert_eq!(step_count(3.0, 1.0), Some(3));
    }
}
