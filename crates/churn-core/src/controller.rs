//! Interaction controller
//!
//! Every panel moves through a small state machine:
//!
//! ```text
//! InitialRender -> AwaitingEvent -> Recomputing -> AwaitingEvent -> ...
//! ```
//!
//! `InitialRender` and `Recomputing` only last while the controller is
//! borrowed mutably, so any reader sees a settled panel in `AwaitingEvent`.
//!
//! Events are routed through a [`HandlerRegistry`] keyed by
//! `(PanelId, EventKind)`. Handlers are plain functions of the table, the
//! panel's current parameters and the event; they never touch another panel.

use std::collections::BTreeMap;
use std::sync::Arc;

use churn_io::CustomerTable;
use churn_stats::BinPolicy;
use serde::Serialize;
use tracing::{debug, warn};

use crate::charts;
use crate::config::ChartConfig;
use crate::error::{DashboardError, DashboardResult};
use crate::event::{EventKind, RangeUpdate, UiEvent};
use crate::figure::Figure;
use crate::panel::{PageLayout, PanelId};

/// Where a panel is in its lifecycle
///
/// Only `AwaitingEvent` is observable through [`Controller::state`]; the other
/// phases are held inside [`Controller::with_registry`] and [`Controller::dispatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelPhase {
    InitialRender,
    AwaitingEvent,
    Recomputing,
}

/// The inputs a panel's figure was last built from
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PanelParams {
    /// Built once, never recomputed
    Static,
    /// Selected categorical column
    Column(String),
    /// Current histogram bin width
    BinWidth(f64),
}

/// State of one panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelState {
    pub phase: PanelPhase,
    pub params: PanelParams,
    pub figure: Figure,
}

/// Everything a handler may read
pub struct RecomputeInput<'a> {
    pub table: &'a CustomerTable,
    pub settings: &'a ChartConfig,
    pub params: &'a PanelParams,
    pub event: &'a UiEvent,
}

/// A handler's result when the event changed something
#[derive(Debug, Clone, PartialEq)]
pub struct PanelUpdate {
    pub params: PanelParams,
    pub figure: Figure,
}

/// A recompute function; `Ok(None)` means the event was ignored
pub type RecomputeFn = fn(&RecomputeInput<'_>) -> DashboardResult<Option<PanelUpdate>>;

/// Registry of event handlers keyed by panel and event kind
pub struct HandlerRegistry {
    handlers: BTreeMap<(PanelId, EventKind), RecomputeFn>,
}

impl HandlerRegistry {
    /// Create a registry with the dashboard's handlers registered
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry.register(PanelId::CategoryBars, EventKind::Dropdown, select_column);
        registry.register(PanelId::TenureHistogram, EventKind::Relayout, rebin_tenure);
        registry.register(
            PanelId::HighTotalCharges,
            EventKind::Relayout,
            rebin_high_total_charges,
        );
        registry
    }

    /// Create an empty registry (for testing)
    pub fn empty() -> Self {
        Self {
            handlers: BTreeMap::new(),
        }
    }

    /// Register a handler, replacing any previous one for the same key
    pub fn register(&mut self, panel: PanelId, kind: EventKind, handler: RecomputeFn) {
        self.handlers.insert((panel, kind), handler);
    }

    /// Look up the handler for a panel and event kind
    pub fn get(&self, panel: PanelId, kind: EventKind) -> Option<RecomputeFn> {
        self.handlers.get(&(panel, kind)).copied()
    }

    /// Event kinds a panel reacts to
    pub fn kinds_for(&self, panel: PanelId) -> Vec<EventKind> {
        self.handlers
            .keys()
            .filter(|(p, _)| *p == panel)
            .map(|&(_, kind)| kind)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

fn select_column(input: &RecomputeInput<'_>) -> DashboardResult<Option<PanelUpdate>> {
    let UiEvent::Dropdown { value } = input.event else {
        return Ok(None);
    };
    if input.params == &PanelParams::Column(value.clone()) {
        return Ok(None);
    }
    let figure = category_bars(input.table, value)?;
    Ok(Some(PanelUpdate {
        params: PanelParams::Column(value.clone()),
        figure,
    }))
}

fn rebin_tenure(input: &RecomputeInput<'_>) -> DashboardResult<Option<PanelUpdate>> {
    rebin(input, BinPolicy::TENURE, |table, _, width| {
        charts::tenure_histogram(table, width)
    })
}

fn rebin_high_total_charges(input: &RecomputeInput<'_>) -> DashboardResult<Option<PanelUpdate>> {
    rebin(input, BinPolicy::CHARGES, |table, settings, width| {
        charts::high_total_charges_histogram(table, settings.high_charges_threshold, width)
    })
}

/// Shared relayout handling for the zoomable histograms
fn rebin(
    input: &RecomputeInput<'_>,
    policy: BinPolicy,
    build: impl Fn(&CustomerTable, &ChartConfig, f64) -> DashboardResult<Figure>,
) -> DashboardResult<Option<PanelUpdate>> {
    let UiEvent::Relayout { data } = input.event else {
        return Ok(None);
    };

    let width = match RangeUpdate::from_relayout(data) {
        RangeUpdate::Zoomed(range) => policy.width_for_range(Some(range)),
        RangeUpdate::Reset => policy.width_for_range(None),
        RangeUpdate::Ignored => return Ok(None),
    };

    if input.params == &PanelParams::BinWidth(width) {
        return Ok(None);
    }

    let figure = build(input.table, input.settings, width)?;
    Ok(Some(PanelUpdate {
        params: PanelParams::BinWidth(width),
        figure,
    }))
}

fn category_bars(table: &CustomerTable, column: &str) -> DashboardResult<Figure> {
    if table.categorical_index(column).is_none() {
        return Err(DashboardError::UnknownColumn(column.to_string()));
    }
    charts::churn_by_category(table, column)
}

/// Build a panel's first figure
fn initial_state(
    panel: PanelId,
    table: &CustomerTable,
    settings: &ChartConfig,
) -> DashboardResult<PanelState> {
    let (params, figure) = match panel {
        PanelId::ChurnPie => (PanelParams::Static, charts::churn_donut(table)),
        PanelId::CategoryBars => (
            PanelParams::Column(settings.default_column.clone()),
            category_bars(table, &settings.default_column)?,
        ),
        PanelId::TenureHistogram => {
            let width = BinPolicy::TENURE.default_width;
            (
                PanelParams::BinWidth(width),
                charts::tenure_histogram(table, width)?,
            )
        }
        PanelId::MonthlyCharges => (
            PanelParams::Static,
            charts::monthly_charges_histogram(table),
        ),
        PanelId::HighTotalCharges => {
            let width = BinPolicy::CHARGES.default_width;
            (
                PanelParams::BinWidth(width),
                charts::high_total_charges_histogram(
                    table,
                    settings.high_charges_threshold,
                    width,
                )?,
            )
        }
    };

    Ok(PanelState {
        phase: PanelPhase::InitialRender,
        params,
        figure,
    })
}

/// Owns the per-panel state and dispatches events to handlers
pub struct Controller {
    table: Arc<CustomerTable>,
    settings: ChartConfig,
    registry: HandlerRegistry,
    panels: BTreeMap<PanelId, PanelState>,
}

impl Controller {
    /// Render every panel with the built-in handlers
    pub fn new(table: Arc<CustomerTable>, settings: ChartConfig) -> DashboardResult<Self> {
        Self::with_registry(table, settings, HandlerRegistry::with_builtins())
    }

    /// Render every panel with a custom registry
    pub fn with_registry(
        table: Arc<CustomerTable>,
        settings: ChartConfig,
        registry: HandlerRegistry,
    ) -> DashboardResult<Self> {
        let mut panels = BTreeMap::new();
        for panel in PanelId::ALL {
            let mut state = initial_state(panel, &table, &settings)?;
            debug!(panel = %panel, "initial render");
            state.phase = PanelPhase::AwaitingEvent;
            panels.insert(panel, state);
        }

        Ok(Self {
            table,
            settings,
            registry,
            panels,
        })
    }

    /// The shared table
    pub fn table(&self) -> &Arc<CustomerTable> {
        &self.table
    }

    /// Chart settings in effect
    pub fn settings(&self) -> &ChartConfig {
        &self.settings
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Current state of a panel
    pub fn state(&self, panel: PanelId) -> Option<&PanelState> {
        self.panels.get(&panel)
    }

    /// Current figure of a panel
    pub fn figure(&self, panel: PanelId) -> Option<&Figure> {
        self.state(panel).map(|s| &s.figure)
    }

    /// Current figures in page order
    pub fn figures(&self) -> impl Iterator<Item = (PanelId, &Figure)> {
        self.panels.iter().map(|(&id, state)| (id, &state.figure))
    }

    /// Page layout with the dropdown on its current column
    pub fn layout(&self) -> PageLayout {
        let column = match self.state(PanelId::CategoryBars).map(|s| &s.params) {
            Some(PanelParams::Column(column)) => column.as_str(),
            _ => self.settings.default_column.as_str(),
        };
        PageLayout::new(&self.table, column)
    }

    /// Route an event to its panel and return the panel's figure afterwards
    ///
    /// Ignored events return the unchanged figure. On error the panel keeps
    /// its previous figure and goes back to awaiting events.
    pub fn dispatch(&mut self, panel: PanelId, event: &UiEvent) -> DashboardResult<&Figure> {
        let kind = event.kind();
        let handler = self
            .registry
            .get(panel, kind)
            .ok_or(DashboardError::UnsupportedEvent { panel, kind })?;
        let state = self
            .panels
            .get_mut(&panel)
            .ok_or_else(|| DashboardError::UnknownPanel(panel.to_string()))?;

        state.phase = PanelPhase::Recomputing;
        debug!(panel = %panel, kind = %kind, "recomputing");

        let result = handler(&RecomputeInput {
            table: &self.table,
            settings: &self.settings,
            params: &state.params,
            event,
        });
        state.phase = PanelPhase::AwaitingEvent;

        match result {
            Ok(Some(update)) => {
                debug!(panel = %panel, params = ?update.params, "panel updated");
                state.params = update.params;
                state.figure = update.figure;
            }
            Ok(None) => {
                debug!(panel = %panel, kind = %kind, "event ignored");
            }
            Err(e) => {
                warn!(panel = %panel, kind = %kind, error = %e, "event rejected");
                return Err(e);
            }
        }

        Ok(&state.figure)
    }
}
