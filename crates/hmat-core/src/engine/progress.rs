#[derive(Debug, Clone)]
pub enum Progress {
    StageStart { name: &'static str },
    StageFinish,

    ItemsStart { total: u64 },
    ItemDone { label: String },
    ItemsFinish,

    Notice(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Forwards workflow progress to an optional observer (the CLI's progress
/// bar). Reporting without a callback is a no-op.
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

    pub(crate) fn stage<T>(&self, name: &'static str, f: impl FnOnce() -> T) -> T {
        self.report(Progress::StageStart { name });
        let out = f();
        self.report(Progress::StageFinish);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn reporter_without_callback_is_silent() {
        ProgressReporter::new().report(Progress::Notice("ignored".into()));
    }

    #[test]
    fn stage_brackets_the_closure() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        let reporter = ProgressReporter::with_callback(Box::new(move |p| {
            let tag = match p {
                Progress::StageStart { name } => format!("start:{name}"),
                Progress::StageFinish => "finish".to_string(),
                other => format!("{other:?}"),
            };
            sink.lock().unwrap().push(tag);
        }));

        let value = reporter.stage("Reading", || {
            reporter.report(Progress::Notice("inside".into()));
            7
        });

        assert_eq!(value, 7);
        assert_eq!(
            *events.lock().unwrap(),
            vec![
                "start:Reading".to_string(),
                "Notice(\"inside\")".to_string(),
                "finish".to_string()
            ]
        );
    }
}
