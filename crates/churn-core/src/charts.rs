//! Chart builders
//!
//! Each builder is a pure function from the customer table (plus a few
//! parameters) to a [`Figure`]. Calling one twice with the same inputs yields
//! an identical figure.

use churn_io::{ChurnLabel, CustomerTable};
use churn_stats::{bin_numeric, churn_counts, group_by_category_and_churn, ChurnCategory};

use crate::error::DashboardResult;
use crate::figure::{
    Annotation, BarMode, BarTrace, Figure, Font, HistogramTrace, Layout, Legend, Marker,
    PieTrace, Title, XBins,
};
use crate::palette::{self, ANNOTATION};

/// Customers above this total charge are shown in the high-value histogram
pub const HIGH_TOTAL_CHARGES_THRESHOLD: f64 = 3000.0;

const OVERLAY_OPACITY: f64 = 0.6;
const BAR_HOVER_TEMPLATE: &str = "<br>%{x}<br>Count: %{y}<extra></extra>";

/// Donut of churned vs retained customers with the total in the middle
pub fn churn_donut(table: &CustomerTable) -> Figure {
    let counts = churn_counts(table);

    let trace = PieTrace {
        values: counts.iter().map(|&(_, n)| n).collect(),
        labels: counts.iter().map(|(l, _)| l.as_str().to_string()).collect(),
        hole: 0.6,
        marker: Marker::per_slice(counts.iter().map(|&(l, _)| palette::label_color(l))),
        textinfo: Some("percent".to_string()),
        textposition: Some("outside".to_string()),
    };

    let layout = Layout {
        title: Some(Title::new("Total counts of customers")),
        showlegend: Some(false),
        annotations: vec![Annotation {
            text: format!("Total counts of customers:<br>{}", table.len()),
            x: 0.5,
            y: 0.5,
            showarrow: false,
            font: Font {
                size: 12,
                color: ANNOTATION.to_hex(),
            },
        }],
        ..Default::default()
    };

    Figure::new().with_trace(trace).with_layout(layout)
}

/// Grouped bars of customer counts by the values of `column`
///
/// Three bars per value: Total, No, Yes.
pub fn churn_by_category(table: &CustomerTable, column: &str) -> DashboardResult<Figure> {
    let grouped = group_by_category_and_churn(table, column)?;

    let mut figure = Figure::new();
    for category in ChurnCategory::DISPLAY_ORDER {
        let (x, y): (Vec<String>, Vec<usize>) = grouped
            .series(category)
            .map(|r| (r.group.clone(), r.count))
            .unzip();
        if x.is_empty() {
            continue;
        }
        figure = figure.with_trace(BarTrace {
            x,
            y,
            name: category.label().to_string(),
            marker: Marker::solid(palette::category_color(category)),
            offsetgroup: Some(category.label().to_string()),
            hovertemplate: Some(BAR_HOVER_TEMPLATE.to_string()),
        });
    }

    let layout = Layout {
        legend: Some(Legend {
            title: Title::new("Churn"),
        }),
        barmode: Some(BarMode::Group),
        bargap: Some(0.2),
        hovermode: Some("closest".to_string()),
        ..Layout::titled(format!("Churn Count by {}", column), column, "Count")
    };

    Ok(figure.with_layout(layout))
}

/// Overlaid tenure histograms, churned over retained
pub fn tenure_histogram(table: &CustomerTable, bin_width: f64) -> DashboardResult<Figure> {
    let layout = Layout::titled("Customer Tenure Histogram", "Tenure", "Count");
    overlay_histogram(
        |label| table.tenure_by_churn(label),
        bin_width,
        layout,
        "tenure",
    )
}

/// Overlaid monthly-charge histograms with renderer-chosen bins
pub fn monthly_charges_histogram(table: &CustomerTable) -> Figure {
    let mut figure = Figure::new();
    for label in ChurnLabel::OVERLAY_ORDER {
        let values = table
            .monthly_charges_by_churn(label)
            .into_iter()
            .filter(|v| v.is_finite())
            .collect();
        figure = figure.with_trace(HistogramTrace {
            x: values,
            name: label.as_str().to_string(),
            marker: Marker::solid(palette::label_color(label)),
            xbins: None,
            opacity: Some(OVERLAY_OPACITY),
        });
    }

    let layout = Layout {
        legend: Some(Legend {
            title: Title::new("Churn"),
        }),
        barmode: Some(BarMode::Overlay),
        bargap: Some(0.1),
        hovermode: Some("x".to_string()),
        ..Layout::titled(
            "Distribution of Churn by Monthly Charges",
            "Monthly Charges",
            "Count",
        )
    };

    figure.with_layout(layout)
}

/// Overlaid histograms of total charges strictly above `threshold`
///
/// Customers whose total charge could not be parsed are left out.
pub fn high_total_charges_histogram(
    table: &CustomerTable,
    threshold: f64,
    bin_width: f64,
) -> DashboardResult<Figure> {
    let layout = Layout::titled(
        "Distribution of High TotalCharges Customers by Churn Status",
        "Total Charges",
        "Count of Customers",
    );
    overlay_histogram(
        |label| table.total_charges_above(label, threshold),
        bin_width,
        layout,
        "high-total-charges",
    )
}

fn overlay_histogram(
    values_for: impl Fn(ChurnLabel) -> Vec<f64>,
    bin_width: f64,
    layout: Layout,
    uirevision: &str,
) -> DashboardResult<Figure> {
    let mut figure = Figure::new();
    for label in ChurnLabel::OVERLAY_ORDER {
        let series = bin_numeric(&values_for(label), bin_width)?;
        figure = figure.with_trace(HistogramTrace {
            x: series.values,
            name: format!("{} - Churn", label),
            marker: Marker::solid(palette::label_color(label)),
            xbins: Some(XBins {
                size: series.bin_width,
            }),
            opacity: Some(OVERLAY_OPACITY),
        });
    }

    let layout = Layout {
        plot_bgcolor: Some("white".to_string()),
        bargap: Some(0.1),
        barmode: Some(BarMode::Overlay),
        uirevision: Some(uirevision.to_string()),
        ..layout
    };

    Ok(figure.with_layout(layout))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::Trace;
    use churn_io::CsvReader;

    const SAMPLE: &str = "customerID,gender,SeniorCitizen,Partner,Dependents,tenure,PhoneService,MultipleLines,InternetService,OnlineSecurity,OnlineBackup,DeviceProtection,TechSupport,StreamingTV,StreamingMovies,Contract,PaperlessBilling,PaymentMethod,MonthlyCharges,TotalCharges,Churn
7590-VHVEG,Female,0,Yes,No,1,No,No phone service,DSL,No,Yes,No,No,No,No,Month-to-month,Yes,Electronic check,29.85,29.85,No
7892-POOKP,Female,0,Yes,No,28,Yes,Yes,Fiber optic,No,No,Yes,Yes,Yes,Yes,Month-to-month,Yes,Electronic check,104.8,3046.05,Yes
6388-TABGU,Male,0,No,Yes,62,Yes,No,DSL,Yes,Yes,No,No,No,No,One year,No,Bank transfer (automatic),56.15,3487.95,No
3668-QPYBK,Male,0,No,No,2,Yes,No,DSL,Yes,Yes,No,No,No,No,Month-to-month,Yes,Mailed check,53.85,108.15,Yes
4472-LVYGI,Female,0,Yes,Yes,0,No,No phone service,DSL,Yes,No,Yes,Yes,Yes,No,Two year,Yes,Bank transfer (automatic),52.55, ,No
6713-OKOMC,Female,0,No,No,10,No,No phone service,DSL,Yes,No,No,No,No,No,Month-to-month,No,Mailed check,29.75,3000,No";

    fn sample() -> CustomerTable {
        CsvReader::parse_str(SAMPLE).unwrap()
    }

    #[test]
    fn test_donut_slices_sum_to_row_count() {
        let table = sample();
        let figure = churn_donut(&table);

        let Trace::Pie(pie) = &figure.data[0] else {
            panic!("expected a pie trace");
        };
        assert_eq!(pie.values.iter().sum::<usize>(), table.len());
        assert_eq!(pie.labels, vec!["No", "Yes"]);
        assert_eq!(pie.hole, 0.6);
        assert_eq!(
            pie.marker.colors,
            Some(vec!["#4682B4".to_string(), "#FF7F50".to_string()])
        );
        assert_eq!(
            figure.layout.annotations[0].text,
            "Total counts of customers:<br>6"
        );
    }

    #[test]
    fn test_bar_chart_has_three_groups_in_order() {
        let figure = churn_by_category(&sample(), "gender").unwrap();

        let names: Vec<&str> = figure
            .data
            .iter()
            .map(|t| match t {
                Trace::Bar(bar) => bar.name.as_str(),
                _ => panic!("expected bar traces"),
            })
            .collect();
        assert_eq!(names, vec!["Total", "No", "Yes"]);

        let Trace::Bar(total) = &figure.data[0] else {
            unreachable!()
        };
        assert_eq!(total.x, vec!["Female", "Male"]);
        assert_eq!(total.y, vec![4, 2]);
        assert_eq!(total.marker.color.as_deref(), Some("#808080"));
        assert_eq!(
            figure.layout.title.as_ref().map(|t| t.text.as_str()),
            Some("Churn Count by gender")
        );
        assert_eq!(figure.layout.barmode, Some(BarMode::Group));
    }

    #[test]
    fn test_bar_chart_rejects_numeric_column() {
        assert!(churn_by_category(&sample(), "MonthlyCharges").is_err());
    }

    #[test]
    fn test_tenure_histogram_uses_bin_width() {
        let figure = tenure_histogram(&sample(), 2.0).unwrap();

        assert_eq!(figure.data.len(), 2);
        for trace in &figure.data {
            let Trace::Histogram(hist) = trace else {
                panic!("expected histogram traces");
            };
            assert_eq!(hist.xbins, Some(XBins { size: 2.0 }));
            assert_eq!(hist.opacity, Some(0.6));
        }
        let Trace::Histogram(churned) = &figure.data[0] else {
            unreachable!()
        };
        assert_eq!(churned.name, "Yes - Churn");
        assert_eq!(churned.x, vec![28.0, 2.0]);
        assert_eq!(figure.layout.barmode, Some(BarMode::Overlay));
    }

    #[test]
    fn test_high_total_charges_excludes_missing_and_threshold() {
        let figure =
            high_total_charges_histogram(&sample(), HIGH_TOTAL_CHARGES_THRESHOLD, 100.0).unwrap();

        let values: Vec<f64> = figure
            .data
            .iter()
            .flat_map(|t| match t {
                Trace::Histogram(hist) => hist.x.clone(),
                _ => Vec::new(),
            })
            .collect();
        // 3000 exactly and the blank total are both excluded
        assert_eq!(values, vec![3046.05, 3487.95]);
    }

    #[test]
    fn test_monthly_histogram_is_auto_binned() {
        let figure = monthly_charges_histogram(&sample());
        for trace in &figure.data {
            let Trace::Histogram(hist) = trace else {
                panic!("expected histogram traces");
            };
            assert!(hist.xbins.is_none());
        }
        assert_eq!(figure.layout.hovermode.as_deref(), Some("x"));
    }

    #[test]
    fn test_builders_are_deterministic() {
        let table = sample();
        assert_eq!(churn_donut(&table), churn_donut(&table));
        assert_eq!(
            churn_by_category(&table, "Contract").unwrap().to_json().unwrap(),
            churn_by_category(&table, "Contract").unwrap().to_json().unwrap()
        );
        assert_eq!(
            tenure_histogram(&table, 5.0).unwrap(),
            tenure_histogram(&table, 5.0).unwrap()
        );
        assert_eq!(
            monthly_charges_histogram(&table).to_json().unwrap(),
            monthly_charges_histogram(&table).to_json().unwrap()
        );
        assert_eq!(
            high_total_charges_histogram(&table, HIGH_TOTAL_CHARGES_THRESHOLD, 50.0)
                .unwrap()
                .to_json()
                .unwrap(),
            high_total_charges_histogram(&table, HIGH_TOTAL_CHARGES_THRESHOLD, 50.0)
                .unwrap()
                .to_json()
                .unwrap()
        );
    }
}
