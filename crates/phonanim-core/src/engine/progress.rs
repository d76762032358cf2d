/// Progress events emitted by the animation workflow.
#[derive(Debug, Clone)]
pub enum Progress {
    /// A named workflow phase (expansion, modulation, archiving) begins.
    PhaseStart { name: &'static str },
    PhaseFinish,

    /// Mode-by-mode animation begins; `total` modes will be generated.
    ModesStart { total: u64 },
    /// One mode's frames have been generated and written.
    ModeFinished {
        mode_number: usize,
        frequency_thz: f64,
    },

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Forwards workflow progress events to an optional callback.
///
/// A default reporter drops all events, which keeps the workflow callable
/// from tests and library consumers that do not render progress.
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
        if let Some(callback) = &self.callback {
            callback(event);
        }
    }
}
