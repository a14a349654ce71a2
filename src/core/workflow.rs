use crate::utils::error::{BepError, Result};
use crate::utils::validation::Validate;
use strum::Display;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WorkflowState<T> {
    #[default]
    Idle,
    Loading,
    Success(T),
    Error,
}

/// Payload-free view of a [`WorkflowState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum WorkflowPhase {
    Idle,
    Loading,
    Success,
    Error,
}

impl<T> WorkflowState<T> {
    pub fn phase(&self) -> WorkflowPhase {
        match self {
            WorkflowState::Idle => WorkflowPhase::Idle,
            WorkflowState::Loading => WorkflowPhase::Loading,
            WorkflowState::Success(_) => WorkflowPhase::Success,
            WorkflowState::Error => WorkflowPhase::Error,
        }
    }
}

/// One request/response workflow. `Loading` gates the instance so at most
/// one call is in flight; independent instances share nothing.
#[derive(Debug, Clone)]
pub struct Workflow<T> {
    name: String,
    state: WorkflowState<T>,
}

impl<T> Workflow<T> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: WorkflowState::Idle,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> &WorkflowState<T> {
        &self.state
    }

    pub fn phase(&self) -> WorkflowPhase {
        self.state.phase()
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, WorkflowState::Loading)
    }

    pub fn payload(&self) -> Option<&T> {
        match &self.state {
            WorkflowState::Success(payload) => Some(payload),
            _ => None,
        }
    }

    /// Moves to `Loading` from any settled phase once `input` passes its
    /// guard. Rejected while a call is already in flight.
    pub fn submit<I: Validate + ?Sized>(&mut self, input: &I) -> Result<()> {
        if self.is_loading() {
            tracing::warn!("Rejected submit on '{}': request in flight", self.name);
            return Err(BepError::WorkflowBusy {
                workflow: self.name.clone(),
            });
        }

        input.validate()?;

        tracing::debug!("Workflow '{}': {} -> loading", self.name, self.phase());
        self.state = WorkflowState::Loading;
        Ok(())
    }

    pub fn resolve(&mut self, payload: T) -> Result<()> {
        self.settle("resolve")?;
        self.state = WorkflowState::Success(payload);
        Ok(())
    }

    pub fn reject(&mut self) -> Result<()> {
        self.settle("reject")?;
        self.state = WorkflowState::Error;
        Ok(())
    }

    fn settle(&self, action: &str) -> Result<()> {
        if !self.is_loading() {
            return Err(BepError::InvalidTransition {
                workflow: self.name.clone(),
                action: action.to_string(),
                phase: self.phase().to_string(),
            });
        }
        tracing::debug!("Workflow '{}': {} from loading", self.name, action);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Input(bool);

    impl Validate for Input {
        fn validate(&self) -> Result<()> {
            if self.0 {
                Ok(())
            } else {
                Err(BepError::validation("guard failed"))
            }
        }
    }

    #[test]
    fn test_happy_path() {
        let mut workflow: Workflow<String> = Workflow::new("generate");
        assert_eq!(workflow.phase(), WorkflowPhase::Idle);

        workflow.submit(&Input(true)).unwrap();
        assert_eq!(workflow.state(), &WorkflowState::Loading);

        workflow.resolve("# BEP".to_string()).unwrap();
        assert_eq!(workflow.state(), &WorkflowState::Success("# BEP".to_string()));
        assert_eq!(workflow.payload().map(String::as_str), Some("# BEP"));
    }

    #[test]
    fn test_submit_while_loading_is_rejected() {
        let mut workflow: Workflow<u32> = Workflow::new("compare");
        workflow.submit(&Input(true)).unwrap();

        let err = workflow.submit(&Input(true)).unwrap_err();
        assert!(matches!(err, BepError::WorkflowBusy { .. }));
        assert!(workflow.is_loading());
    }

    #[test]
    fn test_failed_guard_keeps_state() {
        let mut workflow: Workflow<u32> = Workflow::new("generate");
        assert!(workflow.submit(&Input(false)).is_err());
        assert_eq!(workflow.phase(), WorkflowPhase::Idle);

        workflow.submit(&Input(true)).unwrap();
        workflow.resolve(7).unwrap();
        assert!(workflow.submit(&Input(false)).is_err());
        assert_eq!(workflow.payload(), Some(&7));
    }

    #[test]
    fn test_reject_then_retry() {
        let mut workflow: Workflow<u32> = Workflow::new("generate");
        workflow.submit(&Input(true)).unwrap();
        workflow.reject().unwrap();
        assert_eq!(workflow.state(), &WorkflowState::Error);
        assert_eq!(workflow.payload(), None);

        workflow.submit(&Input(true)).unwrap();
        workflow.resolve(1).unwrap();

        workflow.submit(&Input(true)).unwrap();
        assert!(workflow.is_loading());
    }

    #[test]
    fn test_settle_outside_loading_is_rejected() {
        let mut workflow: Workflow<u32> = Workflow::new("compare");
        assert!(matches!(
            workflow.resolve(1),
            Err(BepError::InvalidTransition { .. })
        ));
        assert!(workflow.reject().is_err());
        assert_eq!(workflow.phase(), WorkflowPhase::Idle);
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(WorkflowPhase::Loading.to_string(), "loading");
    }
}
