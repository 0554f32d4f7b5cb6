//! Drives a [`Controller`] against a [`MealSource`].

use crate::api::MealSource;
use crate::controller::{Command, Controller, Msg, Screen, UiEvent};
use log::debug;
use std::sync::Arc;
use tokio::sync::mpsc;

pub struct App<S: ?Sized> {
    source: Arc<S>,
    controller: Controller,
}

impl<S> App<S>
where
    S: MealSource + ?Sized + 'static,
{
    pub fn new(source: Arc<S>) -> Self {
        Self::with_controller(source, Controller::new())
    }

    pub fn with_controller(source: Arc<S>, controller: Controller) -> Self {
        App { source, controller }
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn screen(&self) -> Screen {
        self.controller.screen()
    }

    /// Handle one input event to completion, awaiting any request it starts
    pub async fn dispatch(&mut self, event: UiEvent) -> Screen {
        if let Some(msg) = event.into_msg() {
            self.send(msg).await;
        }
        self.controller.screen()
    }

    /// Feed a message to the controller and run the commands that follow from it
    pub async fn send(&mut self, msg: Msg) {
        let mut next = self.controller.update(msg);
        while let Some(command) = next {
            let resolved = execute(self.source.as_ref(), command).await;
            next = self.controller.update(resolved);
        }
    }

    /// Event loop: consume `events` until the channel closes and every
    /// in-flight request has resolved, sending a frame whenever the screen
    /// changes.
    ///
    /// Requests run in their own tasks, so responses may come back in any
    /// order; the controller's sequence numbers decide which ones count.
    pub async fn run(
        mut self,
        mut events: mpsc::Receiver<UiEvent>,
        frames: mpsc::UnboundedSender<Screen>,
    ) -> Controller {
        let (done_tx, mut done_rx) = mpsc::unbounded_channel::<Msg>();
        let mut pending = 0usize;
        let mut events_open = true;

        let mut last = self.controller.screen();
        if frames.send(last.clone()).is_err() {
            return self.controller;
        }

        while events_open || pending > 0 {
            let msg = tokio::select! {
                event = events.recv(), if events_open => match event {
                    Some(event) => match event.into_msg() {
                        Some(msg) => msg,
                        None => continue,
                    },
                    None => {
                        debug!("Input closed with {} requests pending", pending);
                        events_open = false;
                        continue;
                    }
                },
                Some(msg) = done_rx.recv(), if pending > 0 => {
                    pending -= 1;
                    msg
                }
                else => break,
            };

            if let Some(command) = self.controller.update(msg) {
                pending += 1;
                let source = Arc::clone(&self.source);
                let done = done_tx.clone();
                tokio::spawn(async move {
                    let msg = execute(source.as_ref(), command).await;
                    // Receiver only goes away when the loop has already stopped
                    let _ = done.send(msg);
                });
            }

            let screen = self.controller.screen();
            if screen != last {
                if frames.send(screen.clone()).is_err() {
                    debug!("Frame receiver dropped, stopping event loop");
                    break;
                }
                last = screen;
            }
        }

        self.controller
    }
}

async fn execute<S>(source: &S, command: Command) -> Msg
where
    S: MealSource + ?Sized,
{
    match command {
        Command::Search { seq, term } => {
            debug!("[{}] search #{} '{}'", source.source_name(), seq, term);
            let result = source.search_by_ingredient(&term).await;
            Msg::SearchResolved { seq, term, result }
        }
        Command::Lookup { seq, id } => {
            debug!("[{}] lookup #{} '{}'", source.source_name(), seq, id);
            let result = source.lookup_by_id(&id).await;
            Msg::LookupResolved { seq, id, result }
        }
    }
}
