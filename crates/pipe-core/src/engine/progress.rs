#[derive(Debug, Clone)]
pub enum Progress {
    PhaseStart { name: &'static str },
    PhaseFinish,

    TaskStart { total_steps: u64 },
    TaskIncrement,
    TaskFinish,

    /// A cluster has been scored against the predictions.
    ClusterEvaluated { representative: String, retained: bool },

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Forwards [`Progress`] events to an optional callback.
///
/// Workflows report unconditionally; a reporter without a callback drops every event.
#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn reporter_without_callback_ignores_events() {
        let reporter = ProgressReporter::new();
        reporter.report(Progress::TaskIncrement);
    }

    #[test]
    fn reporter_forwards_events_in_order() {
        let seen = Mutex::new(Vec::new());
        {
            let reporter = ProgressReporter::with_callback(Box::new(|event| {
                let label = match event {
                    Progress::TaskStart { total_steps } => format!("start:{}", total_steps),
                    Progress::TaskIncrement => "inc".to_string(),
                    Progress::ClusterEvaluated { retained, .. } => format!("cluster:{}", retained),
                    other => format!("{:?}", other),
                };
                seen.lock().unwrap().push(label);
            }));
            reporter.report(Progress::TaskStart { total_steps: 2 });
            reporter.report(Progress::TaskIncrement);
            reporter.report(Progress::ClusterEvaluated {
                representative: "decoy_1".into(),
                retained: true,
            });
        }
        assert_eq!(
            seen.into_inner().unwrap(),
            vec!["start:2", "inc", "cluster:true"]
        );
    }
}
