//! Controller behavior against the sample Telco extract

mod common;

use churn_core::{
    ChartConfig, Controller, DashboardError, EventKind, Figure, PanelId, PanelParams, Trace,
    UiEvent,
};
use common::fixtures::{sample_controller, sample_table};
use proptest::prelude::*;
use serde_json::json;

fn bin_width(figure: &Figure) -> Option<f64> {
    figure.data.iter().find_map(|t| match t {
        Trace::Histogram(hist) => hist.xbins.map(|b| b.size),
        _ => None,
    })
}

fn histogram_values(figure: &Figure) -> Vec<f64> {
    figure
        .data
        .iter()
        .flat_map(|t| match t {
            Trace::Histogram(hist) => hist.x.clone(),
            _ => Vec::new(),
        })
        .collect()
}

fn dropdown(value: &str) -> UiEvent {
    UiEvent::Dropdown {
        value: value.to_string(),
    }
}

#[test]
fn test_initial_figures_cover_every_panel() {
    let controller = sample_controller();
    let ids: Vec<PanelId> = controller.figures().map(|(id, _)| id).collect();
    assert_eq!(ids, PanelId::ALL.to_vec());

    let donut = controller.figure(PanelId::ChurnPie).unwrap();
    let Trace::Pie(pie) = &donut.data[0] else {
        panic!("expected a pie");
    };
    assert_eq!(pie.labels, vec!["No", "Yes"]);
    assert_eq!(pie.values, vec![17, 8]);
}

#[test]
fn test_gender_bars_match_fixture_counts() {
    let controller = sample_controller();
    let bars = controller.figure(PanelId::CategoryBars).unwrap();

    let series: Vec<(String, Vec<usize>)> = bars
        .data
        .iter()
        .map(|t| match t {
            Trace::Bar(bar) => (bar.name.clone(), bar.y.clone()),
            _ => panic!("expected bars"),
        })
        .collect();

    assert_eq!(
        series,
        vec![
            ("Total".to_string(), vec![10, 15]),
            ("No".to_string(), vec![6, 11]),
            ("Yes".to_string(), vec![4, 4]),
        ]
    );
}

#[test]
fn test_senior_citizen_dropdown_uses_labels() {
    let mut controller = sample_controller();
    let figure = controller
        .dispatch(PanelId::CategoryBars, &dropdown("SeniorCitizen"))
        .unwrap();

    let Trace::Bar(total) = &figure.data[0] else {
        panic!("expected bars");
    };
    assert_eq!(total.x, vec!["No", "Yes"]);
    assert_eq!(total.y, vec![23, 2]);
}

#[test]
fn test_high_total_charges_panel() {
    let controller = sample_controller();
    let figure = controller.figure(PanelId::HighTotalCharges).unwrap();

    let values = histogram_values(figure);
    assert_eq!(values.len(), 7);
    assert!(values.iter().all(|&v| v > 3000.0));
    assert_eq!(bin_width(figure), Some(100.0));
}

#[test]
fn test_threshold_comes_from_settings() {
    let settings = ChartConfig {
        high_charges_threshold: 5000.0,
        ..ChartConfig::default()
    };
    let controller = Controller::new(sample_table(), settings).unwrap();
    let values = histogram_values(controller.figure(PanelId::HighTotalCharges).unwrap());
    assert_eq!(values.len(), 4);
}

#[test]
fn test_bin_width_follows_zoom() {
    let mut controller = sample_controller();

    for (span, width) in [(15.0, 1.0), (30.0, 2.0), (75.0, 5.0), (150.0, 10.0)] {
        let figure = controller
            .dispatch(PanelId::TenureHistogram, &UiEvent::zoom(0.0, span))
            .unwrap();
        assert_eq!(bin_width(figure), Some(width), "tenure span {}", span);
    }

    for (span, width) in [(300.0, 50.0), (750.0, 100.0), (1500.0, 200.0)] {
        let figure = controller
            .dispatch(
                PanelId::HighTotalCharges,
                &UiEvent::zoom(3000.0, 3000.0 + span),
            )
            .unwrap();
        assert_eq!(bin_width(figure), Some(width), "charges span {}", span);
    }
}

#[test]
fn test_panels_reject_foreign_events() {
    let mut controller = sample_controller();

    for panel in [PanelId::ChurnPie, PanelId::MonthlyCharges] {
        for event in [dropdown("gender"), UiEvent::zoom(0.0, 10.0)] {
            let err = controller.dispatch(panel, &event).unwrap_err();
            assert!(matches!(err, DashboardError::UnsupportedEvent { .. }));
        }
    }
    assert!(controller.registry().kinds_for(PanelId::ChurnPie).is_empty());
    assert_eq!(
        controller.registry().kinds_for(PanelId::CategoryBars),
        vec![EventKind::Dropdown]
    );
}

#[test]
fn test_relayout_without_data_is_ignored() {
    let mut controller = sample_controller();
    let before = controller.figure(PanelId::TenureHistogram).unwrap().clone();

    let event: UiEvent = serde_json::from_value(json!({"kind": "relayout"})).unwrap();
    let after = controller.dispatch(PanelId::TenureHistogram, &event).unwrap();
    assert_eq!(after, &before);
}

proptest! {
    #[test]
    fn prop_partial_relayout_keeps_width(
        lower in 0.0f64..70.0,
        span in 1.0f64..200.0,
        partial_bound in 0.0f64..100.0,
        use_upper in any::<bool>(),
    ) {
        let mut controller = sample_controller();
        controller
            .dispatch(PanelId::TenureHistogram, &UiEvent::zoom(lower, lower + span))
            .unwrap();
        let params = controller.state(PanelId::TenureHistogram).unwrap().params.clone();
        let figure = controller.figure(PanelId::TenureHistogram).unwrap().clone();

        let key = if use_upper { "xaxis.range[1]" } else { "xaxis.range[0]" };
        let mut data = serde_json::Map::new();
        data.insert(key.to_string(), json!(partial_bound));
        let event = UiEvent::Relayout { data };

        for _ in 0..2 {
            controller.dispatch(PanelId::TenureHistogram, &event).unwrap();
            let state = controller.state(PanelId::TenureHistogram).unwrap();
            prop_assert_eq!(&state.params, &params);
            prop_assert_eq!(&state.figure, &figure);
        }
    }

    #[test]
    fn prop_repeated_zoom_is_idempotent(lower in 3000.0f64..8000.0, span in 1.0f64..3000.0) {
        let mut controller = sample_controller();
        let event = UiEvent::zoom(lower, lower + span);

        let first = controller.dispatch(PanelId::HighTotalCharges, &event).unwrap().clone();
        let second = controller.dispatch(PanelId::HighTotalCharges, &event).unwrap().clone();
        prop_assert_eq!(&first, &second);

        let PanelParams::BinWidth(width) =
            controller.state(PanelId::HighTotalCharges).unwrap().params
        else {
            panic!("expected a bin width");
        };
        prop_assert_eq!(bin_width(&first), Some(width));
    }
}
