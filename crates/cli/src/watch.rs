//! `zplm watch`: re-translate (and optionally re-render) a markup file
//! whenever it changes, coalescing bursts of edits.

use std::fs;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant, SystemTime};

use zpl_markup_core::Translator;
use zpl_markup_raster_client::Rasterizer;

use crate::debounce::Debouncer;
use crate::render::{Format, print_summary, render_diagnostics};
use crate::store::MarkupStore;

/// What one refresh cycle achieved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Refresh {
    /// The markup file does not exist yet.
    Waiting,
    /// Reading, translating, or writing the command stream failed.
    Failed,
    /// The command stream was emitted; `rendered` is set when a preview
    /// image was written too.
    Emitted { rendered: bool },
}

/// How often the file's modification time is sampled.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub(crate) struct Watch<R> {
    pub(crate) store: MarkupStore,
    pub(crate) translator: Translator,
    pub(crate) rasterizer: Option<R>,
    pub(crate) png: Option<PathBuf>,
    pub(crate) zpl: Option<PathBuf>,
    pub(crate) debounce: Duration,
    pub(crate) format: Format,
}

impl<R: Rasterizer> Watch<R> {
    /// Poll forever. Failures are reported and the loop keeps going.
    pub(crate) fn run(&self) -> ! {
        let mut debouncer = Debouncer::new(self.debounce);
        let mut last_seen = self.modified();
        self.refresh();

        loop {
            let current = self.modified();
            if current != last_seen {
                last_seen = current;
                if current.is_some() {
                    tracing::debug!(path = %self.store.path().display(), "change detected");
                    debouncer.notify(Instant::now());
                } else {
                    tracing::debug!("file disappeared, dropping pending refresh");
                    debouncer.cancel();
                }
            }

            if debouncer.poll(Instant::now()) {
                let outcome = self.refresh();
                tracing::debug!(?outcome, "refreshed");
            }
            thread::sleep(POLL_INTERVAL);
        }
    }

    fn modified(&self) -> Option<SystemTime> {
        fs::metadata(self.store.path()).and_then(|m| m.modified()).ok()
    }

    /// One translate (+ rasterize) cycle. Failures are reported, never
    /// propagated; a failed preview still emits the command stream.
    pub(crate) fn refresh(&self) -> Refresh {
        let file = self.store.path().display().to_string();
        let markup = match self.store.load() {
            Ok(Some(markup)) => markup,
            Ok(None) => {
                eprintln!("waiting for {file} to exist");
                return Refresh::Waiting;
            }
            Err(e) => {
                eprintln!("error: failed to read {file}: {e}");
                return Refresh::Failed;
            }
        };

        let translation = match self.translator.translate(&markup) {
            Ok(t) => t,
            Err(e) => {
                render_diagnostics(&markup, &file, &[e.to_diagnostic()], self.format);
                return Refresh::Failed;
            }
        };
        if !translation.diagnostics.is_empty() {
            render_diagnostics(&markup, &file, &translation.diagnostics, self.format);
            print_summary(&translation.diagnostics);
        }

        match &self.zpl {
            Some(path) => {
                if let Err(e) = fs::write(path, &translation.zpl) {
                    eprintln!("error: failed to write {}: {e}", path.display());
                    return Refresh::Failed;
                }
            }
            None if self.png.is_none() => println!("{}\n", translation.zpl),
            None => {}
        }

        let (Some(rasterizer), Some(png)) = (&self.rasterizer, &self.png) else {
            return Refresh::Emitted { rendered: false };
        };
        let rendered = match rasterizer.rasterize(&translation.zpl) {
            Ok(image) => match fs::write(png, &image.bytes) {
                Ok(()) => {
                    eprintln!("rendered {}", png.display());
                    true
                }
                Err(e) => {
                    eprintln!("error: failed to write {}: {e}", png.display());
                    false
                }
            },
            Err(e) => {
                eprintln!("error: preview failed: {}", crate::error_chain(&e));
                false
            }
        };
        Refresh::Emitted { rendered }
    }
}
