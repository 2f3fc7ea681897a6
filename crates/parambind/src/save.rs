//! Save orchestration with before/after hooks.

use std::fmt;

use tracing::{debug, info};

use crate::bind::HookResult;
use crate::error::{BindError, Result};
use crate::record::Record;

type SaveHook<R> = Box<dyn Fn(&mut R) -> HookResult<()> + Send + Sync>;

/// Runs `before_save`, then `record.save()`, then `after_save` on success.
///
/// Attributes must already be merged onto the record; this is the only
/// place persistence is triggered.
pub struct SaveOrchestrator<R: ?Sized> {
    before_save: Option<SaveHook<R>>,
    after_save: Option<SaveHook<R>>,
}

impl<R: Record + ?Sized> SaveOrchestrator<R> {
    pub fn new() -> Self {
        Self {
            before_save: None,
            after_save: None,
        }
    }

    /// Run before every save. It cannot veto the save; returning an error
    /// aborts the request instead.
    pub fn with_before_save<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut R) -> HookResult<()> + Send + Sync + 'static,
    {
        self.before_save = Some(Box::new(hook));
        self
    }

    /// Run after a successful save only.
    pub fn with_after_save<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut R) -> HookResult<()> + Send + Sync + 'static,
    {
        self.after_save = Some(Box::new(hook));
        self
    }

    /// Save `record`, returning whether it was persisted.
    pub fn save(&self, record: &mut R) -> Result<bool> {
        if let Some(hook) = &self.before_save {
            debug!(model = record.model_name(), "running before_save");
            hook(&mut *record).map_err(|e| BindError::hook("before_save", e))?;
        }

        let saved = record.save()?;
        info!(model = record.model_name(), saved, "save finished");

        if saved {
            if let Some(hook) = &self.after_save {
                debug!(model = record.model_name(), "running after_save");
                hook(&mut *record).map_err(|e| BindError::hook("after_save", e))?;
            }
        }
        Ok(saved)
    }
}

impl<R: Record + ?Sized> Default for SaveOrchestrator<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ?Sized> fmt::Debug for SaveOrchestrator<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SaveOrchestrator")
            .field("before_save", &self.before_save.is_some())
            .field("after_save", &self.after_save.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bind::BoundValue;
    use std::sync::{Arc, Mutex};

    struct Scripted {
        result: bool,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    impl Record for Scripted {
        fn model_name(&self) -> &str {
            "Scripted"
        }

        fn assign(&mut self, _name: &str, _value: &BoundValue) -> Result<()> {
            Ok(())
        }

        fn save(&mut self) -> Result<bool> {
            self.log.lock().unwrap().push("save");
            Ok(self.result)
        }
    }

    fn orchestrator() -> SaveOrchestrator<Scripted> {
        SaveOrchestrator::new()
            .with_before_save(|r: &mut Scripted| {
                r.log.lock().unwrap().push("before");
                Ok(())
            })
            .with_after_save(|r: &mut Scripted| {
                r.log.lock().unwrap().push("after");
                Ok(())
            })
    }

    #[test]
    fn test_hooks_wrap_successful_save() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut record = Scripted { result: true, log: Arc::clone(&log) };

        assert!(orchestrator().save(&mut record).unwrap());
        assert_eq!(*log.lock().unwrap(), vec!["before", "save", "after"]);
    }

    #[test]
    fn test_after_save_skipped_on_failure() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut record = Scripted { result: false, log: Arc::clone(&log) };

        assert!(!orchestrator().save(&mut record).unwrap());
        assert_eq!(*log.lock().unwrap(), vec!["before", "save"]);
    }

    #[test]
    fn test_no_hooks() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut record = Scripted { result: true, log: Arc::clone(&log) };

        assert!(SaveOrchestrator::new().save(&mut record).unwrap());
        assert_eq!(*log.lock().unwrap(), vec!["save"]);
    }

    #[test]
    fn test_before_save_error_prevents_save() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut record = Scripted { result: true, log: Arc::clone(&log) };
        let orchestrator =
            SaveOrchestrator::new().with_before_save(|_: &mut Scripted| Err("locked".into()));

        let err = orchestrator.save(&mut record).unwrap_err();
        assert!(matches!(err, BindError::Hook { ref hook, .. } if hook == "before_save"));
        assert!(log.lock().unwrap().is_empty());
    }
}
