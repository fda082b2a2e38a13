/// Caller-supplied progress callback receiving a percentage in `0..=100`.
pub type ProgressFn<'a> = &'a (dyn Fn(u8) + Send + Sync);

/// Fire-and-forget progress reporting.
///
/// Forwards to the callback only when the integer percentage changes, so tight
/// loops can call `report` freely without flooding the presentation layer.
pub struct Progress<'a> {
    callback: Option<ProgressFn<'a>>,
    last: Option<u8>,
}

impl<'a> Progress<'a> {
    pub fn new(callback: Option<ProgressFn<'a>>) -> Self {
        Self {
            callback,
            last: None,
        }
    }

    /// Reporter that discards every update.
    pub fn silent() -> Self {
        Self::new(None)
    }

    pub fn report(&mut self, done: usize, total: usize) {
        let percent = if total == 0 {
            100
        } else {
            ((done.min(total) as u128 * 100) / total as u128) as u8
        };
        self.report_percent(percent);
    }

    /// Report `done / total` of step `part` out of `parts` equal steps.
    ///
    /// Lets a per-file loop hand the reporter to a per-sample loop without the
    /// percentage jumping backwards between files.
    pub fn report_within(&mut self, part: usize, parts: usize, done: usize, total: usize) {
        if parts == 0 {
            self.report_percent(100);
            return;
        }
        let total = total.max(1) as u128;
        let done = done.min(total as usize) as u128;
        let scaled = part.min(parts) as u128 * total + done;
        let percent = (scaled * 100) / (parts as u128 * total);
        self.report_percent(percent.min(100) as u8);
    }

    pub fn report_percent(&mut self, percent: u8) {
        let percent = percent.min(100);
        if self.last == Some(percent) {
            return;
        }
        self.last = Some(percent);
        if let Some(callback) = self.callback {
            callback(percent);
        }
    }

    pub fn finish(&mut self) {
        self.report_percent(100);
    }
}
