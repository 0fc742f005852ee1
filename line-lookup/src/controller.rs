//! Line and station selection.
//!
//! [`SelectionController`] owns the current [`SelectionState`] and the
//! dataset of the selected line. Each event produces a new state value and
//! an [`Outcome`] describing what the output panel should show.
//!
//! Dataset loads are asynchronous and are matched back to the selection
//! that requested them through a [`FetchTicket`]. Every line change bumps
//! the fetch generation, so a load that lands after a newer selection is
//! discarded instead of overwriting it.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::{LineDataset, LineName};
use crate::resolver::{DisplayOptions, ResolvedView, resolve};
use crate::source::SourceError;

/// The user's current selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    line: Option<LineName>,
    station: Option<String>,
    options: DisplayOptions,
}

impl SelectionState {
    /// Selection with the given toggles and nothing chosen.
    pub fn new(options: DisplayOptions) -> Self {
        Self {
            line: None,
            station: None,
            options,
        }
    }

    pub fn line(&self) -> Option<&LineName> {
        self.line.as_ref()
    }

    pub fn station(&self) -> Option<&str> {
        self.station.as_deref()
    }

    pub fn options(&self) -> DisplayOptions {
        self.options
    }

    /// A new line clears the station.
    fn with_line(&self, line: Option<LineName>) -> Self {
        Self {
            line,
            station: None,
            options: self.options,
        }
    }

    fn with_station(&self, station: Option<String>) -> Self {
        Self {
            station,
            ..self.clone()
        }
    }

    fn with_options(&self, options: DisplayOptions) -> Self {
        Self {
            options,
            ..self.clone()
        }
    }
}

/// Identifies a dataset load requested by [`SelectionController::select_line`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    line: LineName,
    generation: u64,
}

impl FetchTicket {
    /// The line to load.
    pub fn line(&self) -> &LineName {
        &self.line
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What the output panel should show after an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Resolved station facts and/or line lists
    View(ResolvedView),
    /// A line is loaded but there is nothing to show yet
    Prompt(String),
    /// No line is selected
    Empty,
    /// Loading the line failed
    Failed(String),
    /// A superseded dataset load arrived and was ignored
    Stale,
}

/// Drives selection changes for one user session.
#[derive(Debug, Default)]
pub struct SelectionController {
    state: SelectionState,
    dataset: Option<Arc<LineDataset>>,
    generation: u64,
}

impl SelectionController {
    /// Create a controller with the given toggles and nothing selected.
    pub fn new(options: DisplayOptions) -> Self {
        Self {
            state: SelectionState::new(options),
            dataset: None,
            generation: 0,
        }
    }

    /// The current selection.
    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// The dataset of the selected line, once loaded.
    pub fn dataset(&self) -> Option<&Arc<LineDataset>> {
        self.dataset.as_ref()
    }

    /// Station choices for the selected line; empty until a dataset loads.
    pub fn station_names(&self) -> Vec<&str> {
        self.dataset
            .as_deref()
            .map(|d| d.station_names().collect())
            .unwrap_or_default()
    }

    /// Select a line (or clear the selection with `None`).
    ///
    /// Drops the station and the previous dataset. Returns the load to
    /// perform, which must be reported back through
    /// [`dataset_loaded`](Self::dataset_loaded).
    pub fn select_line(&mut self, line: Option<LineName>) -> Option<FetchTicket> {
        self.generation += 1;
        self.dataset = None;
        self.state = self.state.with_line(line);

        self.state.line.clone().map(|line| FetchTicket {
            line,
            generation: self.generation,
        })
    }

    /// Report the result of a dataset load.
    pub fn dataset_loaded(
        &mut self,
        ticket: FetchTicket,
        result: Result<Arc<LineDataset>, SourceError>,
    ) -> Outcome {
        if ticket.generation != self.generation {
            debug!(
                line = %ticket.line,
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale dataset load"
            );
            return Outcome::Stale;
        }

        match result {
            Ok(dataset) => {
                self.dataset = Some(dataset);
                self.state = self.state.with_station(None);
                self.current()
            }
            Err(e) => {
                if e.is_malformed() {
                    warn!(line = %ticket.line, error = %e, "malformed line dataset");
                } else {
                    warn!(line = %ticket.line, error = %e, "failed to load line dataset");
                }
                self.dataset = None;
                self.state = self.state.with_station(None);
                Outcome::Failed(format!(
                    "Failed to load data for {} line.",
                    ticket.line.display_name()
                ))
            }
        }
    }

    /// Select a station on the loaded line.
    ///
    /// A name that is not on the line clears the station.
    pub fn select_station(&mut self, name: Option<&str>) -> Outcome {
        let station = name
            .filter(|n| {
                self.dataset
                    .as_deref()
                    .is_some_and(|d| d.station(n).is_some())
            })
            .map(str::to_string);
        self.state = self.state.with_station(station);
        self.current()
    }

    /// Change the list toggles.
    pub fn set_options(&mut self, options: DisplayOptions) -> Outcome {
        self.state = self.state.with_options(options);
        self.current()
    }

    /// Resolve the current selection.
    pub fn current(&self) -> Outcome {
        let Some(dataset) = self.dataset.as_deref() else {
            return Outcome::Empty;
        };

        let station = self.state.station().and_then(|n| dataset.station(n));
        match resolve(station, dataset, self.state.options) {
            Some(view) => Outcome::View(view),
            None => Outcome::Prompt(format!(
                "Select a station from the {} line.",
                dataset.line.display_name()
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DatasetError, Station};

    fn line(name: &str) -> LineName {
        LineName::parse(name).unwrap()
    }

    fn dataset(name: &str, stations: &[&str]) -> Arc<LineDataset> {
        let mut d = LineDataset::new(
            line(name),
            stations.iter().map(|s| Station::named(*s)).collect(),
        );
        d.terminating = vec![stations[stations.len() - 1].to_string()];
        Arc::new(d)
    }

    fn loaded(name: &str, stations: &[&str], options: DisplayOptions) -> SelectionController {
        let mut controller = SelectionController::new(options);
        let ticket = controller.select_line(Some(line(name))).unwrap();
        controller.dataset_loaded(ticket, Ok(dataset(name, stations)));
        controller
    }

    #[test]
    fn starts_empty() {
        let controller = SelectionController::default();
        assert_eq!(controller.current(), Outcome::Empty);
        assert!(controller.station_names().is_empty());
        assert_eq!(controller.state(), &SelectionState::default());
    }

    #[test]
    fn line_load_prompts_for_station() {
        let mut controller = SelectionController::default();
        let ticket = controller.select_line(Some(line("frankston"))).unwrap();
        assert_eq!(ticket.line(), &line("frankston"));

        let outcome = controller.dataset_loaded(ticket, Ok(dataset("frankston", &["A", "B"])));
        assert_eq!(
            outcome,
            Outcome::Prompt("Select a station from the Frankston line.".into())
        );
        assert_eq!(controller.station_names(), vec!["A", "B"]);
    }

    #[test]
    fn line_load_with_toggle_shows_list() {
        let mut controller = SelectionController::new(DisplayOptions::new(true, false));
        let ticket = controller.select_line(Some(line("frankston"))).unwrap();

        let Outcome::View(view) =
            controller.dataset_loaded(ticket, Ok(dataset("frankston", &["A", "B"])))
        else {
            panic!("expected a view");
        };
        assert_eq!(view.station, None);
        assert_eq!(view.terminating, Some(vec!["B".to_string()]));
    }

    #[test]
    fn selecting_a_station_resolves_it() {
        let mut controller = loaded("frankston", &["A", "B"], DisplayOptions::default());

        let Outcome::View(view) = controller.select_station(Some("B")) else {
            panic!("expected a view");
        };
        let station = view.station.unwrap();
        assert_eq!(station.name, "B");
        assert!(station.flags.terminating);
        assert_eq!(controller.state().station(), Some("B"));
    }

    #[test]
    fn unknown_station_clears_selection() {
        let mut controller = loaded("frankston", &["A", "B"], DisplayOptions::default());
        controller.select_station(Some("A"));

        let outcome = controller.select_station(Some("Zzz"));
        assert_eq!(controller.state().station(), None);
        assert!(matches!(outcome, Outcome::Prompt(_)));
    }

    #[test]
    fn station_without_line_is_empty() {
        let mut controller = SelectionController::default();
        assert_eq!(controller.select_station(Some("A")), Outcome::Empty);
        assert_eq!(controller.state().station(), None);
    }

    #[test]
    fn toggles_re_resolve_current_station() {
        let mut controller = loaded("frankston", &["A", "B"], DisplayOptions::default());
        controller.select_station(Some("A"));

        let Outcome::View(view) = controller.set_options(DisplayOptions::new(true, false)) else {
            panic!("expected a view");
        };
        assert_eq!(view.station.unwrap().name, "A");
        assert_eq!(view.terminating, Some(vec!["B".to_string()]));
        assert_eq!(controller.state().options(), DisplayOptions::new(true, false));
    }

    #[test]
    fn line_change_clears_station_and_dataset() {
        let mut controller = loaded("frankston", &["A", "B"], DisplayOptions::default());
        controller.select_station(Some("A"));

        let ticket = controller.select_line(Some(line("sandringham")));
        assert!(ticket.is_some());
        assert_eq!(controller.state().station(), None);
        assert!(controller.dataset().is_none());
        assert_eq!(controller.current(), Outcome::Empty);
    }

    #[test]
    fn clearing_the_line_returns_no_ticket() {
        let mut controller = loaded("frankston", &["A"], DisplayOptions::default());
        assert_eq!(controller.select_line(None), None);
        assert_eq!(controller.state().line(), None);
        assert_eq!(controller.current(), Outcome::Empty);
    }

    #[test]
    fn stale_load_is_discarded() {
        let mut controller = SelectionController::default();
        let first = controller.select_line(Some(line("frankston"))).unwrap();
        let second = controller.select_line(Some(line("sandringham"))).unwrap();
        assert!(second.generation() > first.generation());

        let outcome = controller.dataset_loaded(second, Ok(dataset("sandringham", &["X", "Y"])));
        assert!(matches!(outcome, Outcome::Prompt(_)));

        let before = controller.state().clone();
        let outcome = controller.dataset_loaded(first, Ok(dataset("frankston", &["A", "B"])));
        assert_eq!(outcome, Outcome::Stale);
        assert_eq!(controller.state(), &before);
        assert_eq!(controller.station_names(), vec!["X", "Y"]);
    }

    #[test]
    fn stale_failure_is_discarded() {
        let mut controller = SelectionController::default();
        let first = controller.select_line(Some(line("frankston"))).unwrap();
        let second = controller.select_line(Some(line("sandringham"))).unwrap();
        controller.dataset_loaded(second, Ok(dataset("sandringham", &["X"])));

        let err = SourceError::NotFound {
            what: "frankston.json".into(),
        };
        assert_eq!(controller.dataset_loaded(first, Err(err)), Outcome::Stale);
        assert!(controller.dataset().is_some());
    }

    #[test]
    fn failed_load_reports_and_resets() {
        let mut controller = SelectionController::default();
        let ticket = controller.select_line(Some(line("frankston"))).unwrap();

        let err = SourceError::from(DatasetError::Malformed {
            line: line("frankston"),
            message: "expected a sequence".into(),
        });
        let outcome = controller.dataset_loaded(ticket, Err(err));
        assert_eq!(
            outcome,
            Outcome::Failed("Failed to load data for Frankston line.".into())
        );
        assert!(controller.station_names().is_empty());
        assert_eq!(controller.state().line(), Some(&line("frankston")));
        assert_eq!(controller.current(), Outcome::Empty);
    }
}
