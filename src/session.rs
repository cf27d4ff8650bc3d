//! Plan execution: a loaded workout plan turned into an editable checklist
//! that, on save, logs completed exercises and pushes changed targets back
//! into the plan.

use crate::errors::{ApiError, SaveFailure, SessionError};
use crate::gateway::ApiGateway;
use crate::models::{
    weekday_name, ExerciseDefaults, Muscle, NewWorkout, PlanExercise, WorkoutPlan, WorkoutRecord,
};
use crate::store::RecordStore;
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tokio::sync::Mutex;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseField {
    Weight,
    Reps,
    Sets,
}

impl FromStr for ExerciseField {
    type Err = SessionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "weight" => Ok(ExerciseField::Weight),
            "reps" => Ok(ExerciseField::Reps),
            "sets" => Ok(ExerciseField::Sets),
            other => Err(SessionError::UnknownField(other.to_string())),
        }
    }
}

/// Working copy of one plan exercise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseState {
    pub exercise_index: usize,
    pub completed: bool,
    pub exercise_name: String,
    pub muscle: Muscle,
    pub weight: f64,
    pub reps: f64,
    pub sets: f64,
    pub modified: bool,
}

impl ExerciseState {
    fn from_template(exercise_index: usize, exercise: &PlanExercise) -> Self {
        Self {
            exercise_index,
            completed: false,
            exercise_name: exercise.exercise_name.clone(),
            muscle: exercise.muscle,
            weight: exercise.target_weight,
            reps: exercise.target_reps,
            sets: exercise.target_sets,
            modified: false,
        }
    }

    fn differs_from(&self, template: &PlanExercise) -> bool {
        self.weight != template.target_weight
            || self.reps != template.target_reps
            || self.sets != template.target_sets
    }
}

#[derive(Debug, Clone)]
struct LoadedPlan {
    plan: WorkoutPlan,
    exercises: Vec<ExerciseState>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub plan_id: Option<String>,
    pub plan_name: Option<String>,
    pub exercises: Vec<ExerciseState>,
    pub saving: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SaveStep {
    pub exercise_index: usize,
    pub workout: NewWorkout,
    /// Present when the working values differ from the plan's targets.
    pub defaults: Option<ExerciseDefaults>,
}

/// Everything one save will send, captured while the session was locked.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveBatch {
    pub plan_id: String,
    pub steps: Vec<SaveStep>,
    generation: u64,
}

impl SaveBatch {
    pub fn total_steps(&self) -> usize {
        self.steps
            .iter()
            .map(|step| 1 + usize::from(step.defaults.is_some()))
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveReport {
    pub logged: Vec<WorkoutRecord>,
    pub updated_defaults: usize,
    /// False when the records could not be re-fetched after the save.
    pub refreshed: bool,
}

#[derive(Debug, Clone, Default)]
pub struct PlanSession {
    loaded: Option<LoadedPlan>,
    saving: bool,
    generation: u64,
}

impl PlanSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plan(&self) -> Option<&WorkoutPlan> {
        self.loaded.as_ref().map(|loaded| &loaded.plan)
    }

    pub fn exercises(&self) -> &[ExerciseState] {
        self.loaded
            .as_ref()
            .map(|loaded| loaded.exercises.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Replaces the working set, discarding any unsaved edits.
    pub fn load_plan(&mut self, plan: WorkoutPlan) {
        let exercises = plan
            .exercises
            .iter()
            .enumerate()
            .map(|(index, exercise)| ExerciseState::from_template(index, exercise))
            .collect();
        info!("loaded plan '{}' ({})", plan.plan_name, plan.id);
        self.generation += 1;
        self.loaded = Some(LoadedPlan { plan, exercises });
    }

    /// Loads the first plan assigned to `weekday`, unless a plan is already loaded.
    pub fn auto_load_for(&mut self, plans: &[WorkoutPlan], weekday: Weekday) -> bool {
        if self.loaded.is_some() {
            return false;
        }
        let day = weekday_name(weekday);
        match plans.iter().find(|plan| plan.is_assigned_to(day)) {
            Some(plan) => {
                info!("auto-loading plan '{}' for {day}", plan.plan_name);
                self.load_plan(plan.clone());
                true
            }
            None => false,
        }
    }

    /// Returns the new completion flag.
    pub fn toggle_completion(&mut self, index: usize) -> Result<bool, SessionError> {
        let state = self.exercise_mut(index)?;
        state.completed = !state.completed;
        Ok(state.completed)
    }

    /// Input that is not a finite number is stored as 0.
    pub fn edit_field(
        &mut self,
        index: usize,
        field: ExerciseField,
        raw: &str,
    ) -> Result<(), SessionError> {
        let value = parse_or_zero(raw);
        let loaded = self.loaded.as_mut().ok_or(SessionError::NoPlanLoaded)?;
        let state = loaded
            .exercises
            .get_mut(index)
            .ok_or(SessionError::IndexOutOfRange(index))?;
        match field {
            ExerciseField::Weight => state.weight = value,
            ExerciseField::Reps => state.reps = value,
            ExerciseField::Sets => state.sets = value,
        }
        state.modified = loaded
            .plan
            .exercises
            .get(state.exercise_index)
            .is_some_and(|template| state.differs_from(template));
        Ok(())
    }

    /// Validates the completed exercises and marks the session busy.
    pub fn begin_save(&mut self) -> Result<SaveBatch, SessionError> {
        let loaded = self.loaded.as_ref().ok_or(SessionError::NoPlanLoaded)?;
        if self.saving {
            return Err(SessionError::Busy);
        }

        let steps = loaded
            .exercises
            .iter()
            .filter(|state| state.completed)
            .map(save_step)
            .collect::<Result<Vec<_>, _>>()?;
        if steps.is_empty() {
            return Err(SessionError::NothingCompleted);
        }

        let batch = SaveBatch {
            plan_id: loaded.plan.id.clone(),
            steps,
            generation: self.generation,
        };
        self.saving = true;
        Ok(batch)
    }

    /// Clears the busy flag. After a successful save the completion flags are
    /// reset, unless a different plan was loaded in the meantime.
    pub fn finish_save(&mut self, batch: &SaveBatch, succeeded: bool) {
        self.saving = false;
        if !succeeded || batch.generation != self.generation {
            return;
        }
        if let Some(loaded) = self.loaded.as_mut() {
            for state in &mut loaded.exercises {
                state.completed = false;
            }
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            plan_id: self.plan().map(|plan| plan.id.clone()),
            plan_name: self.plan().map(|plan| plan.plan_name.clone()),
            exercises: self.exercises().to_vec(),
            saving: self.saving,
        }
    }

    fn exercise_mut(&mut self, index: usize) -> Result<&mut ExerciseState, SessionError> {
        self.loaded
            .as_mut()
            .ok_or(SessionError::NoPlanLoaded)?
            .exercises
            .get_mut(index)
            .ok_or(SessionError::IndexOutOfRange(index))
    }
}

/// Saves the completed exercises of the shared session. The session lock is
/// released while requests are in flight; the busy flag keeps a second save
/// from starting meanwhile.
///
/// Once every step has gone through the save is reported as done, even when
/// re-fetching the records afterwards fails. `SaveReport::refreshed` tells
/// the two cases apart.
pub async fn save_completed(
    gateway: &dyn ApiGateway,
    session: &Mutex<PlanSession>,
    store: &Mutex<RecordStore>,
) -> Result<SaveReport, SessionError> {
    let batch = session.lock().await.begin_save()?;
    info!(
        "saving {} exercises from plan {}",
        batch.steps.len(),
        batch.plan_id
    );

    let outcome = execute_batch(gateway, &batch).await;
    session.lock().await.finish_save(&batch, outcome.is_ok());
    let mut report = outcome?;

    let mut store = store.lock().await;
    match refresh_after_save(gateway, &mut store).await {
        Ok(()) => report.refreshed = true,
        Err(err) => warn!("save went through but refreshing records failed: {err}"),
    }
    Ok(report)
}

async fn refresh_after_save(
    gateway: &dyn ApiGateway,
    store: &mut RecordStore,
) -> Result<(), ApiError> {
    store.refresh_workouts(gateway).await?;
    store.refresh_plans(gateway).await?;
    Ok(())
}

/// Sends the batch step by step and stops at the first failure.
async fn execute_batch(
    gateway: &dyn ApiGateway,
    batch: &SaveBatch,
) -> Result<SaveReport, SaveFailure> {
    let total_steps = batch.total_steps();
    let mut completed_steps = 0;
    let mut report = SaveReport {
        logged: Vec::with_capacity(batch.steps.len()),
        updated_defaults: 0,
        refreshed: false,
    };

    let fail = |completed_steps, step: &SaveStep, error: ApiError| {
        warn!(
            "save of '{}' failed after {completed_steps}/{total_steps} steps: {error}",
            step.workout.exercise_name
        );
        SaveFailure {
            completed_steps,
            total_steps,
            exercise_name: step.workout.exercise_name.clone(),
            error,
        }
    };

    for step in &batch.steps {
        let record = gateway
            .create_workout(&step.workout)
            .await
            .map_err(|err| fail(completed_steps, step, err))?;
        completed_steps += 1;
        report.logged.push(record);

        if let Some(defaults) = &step.defaults {
            gateway
                .update_plan_exercise_defaults(&batch.plan_id, step.exercise_index, defaults)
                .await
                .map_err(|err| fail(completed_steps, step, err))?;
            completed_steps += 1;
            report.updated_defaults += 1;
        }
    }

    info!(
        "saved {} workouts, updated {} plan defaults",
        report.logged.len(),
        report.updated_defaults
    );
    Ok(report)
}

fn save_step(state: &ExerciseState) -> Result<SaveStep, SessionError> {
    let workout = NewWorkout {
        exercise_name: state.exercise_name.clone(),
        weight: state.weight,
        reps: whole_count(&state.exercise_name, "reps", state.reps)?,
        sets: whole_count(&state.exercise_name, "sets", state.sets)?,
        muscle: state.muscle,
    };
    workout.validate()?;

    let defaults = state.modified.then(|| ExerciseDefaults {
        target_weight: state.weight,
        target_reps: state.reps,
        target_sets: state.sets,
    });
    Ok(SaveStep {
        exercise_index: state.exercise_index,
        workout,
        defaults,
    })
}

fn whole_count(exercise: &str, label: &str, value: f64) -> Result<u32, ApiError> {
    if value.is_finite() && value >= 1.0 && value.fract() == 0.0 && value <= f64::from(u32::MAX) {
        Ok(value as u32)
    } else {
        Err(ApiError::validation(format!(
            "{exercise}: {label} must be a whole number of at least 1"
        )))
    }
}

// TODO: decide with product whether blank or invalid input should be rejected
// instead of silently becoming 0.
fn parse_or_zero(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => {
            warn!("non-numeric input '{raw}' treated as 0");
            0.0
        }
    }
}
