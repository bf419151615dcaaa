//! `pun-dashboard` - terminal front end for the PUN dashboard core
//!
//! Renders the dashboard view as text (bar charts, summary cards, calendar)
//! or JSON for other front ends.

use std::fmt::Write as _;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use pun_dashboard::calendar::WEEKDAY_HEADERS;
use pun_dashboard::csv_parser::write_pun_csv;
use pun_dashboard::transformations::format_date_long;
use pun_dashboard::{
    AxisDomain, CalendarModel, DashboardConfig, DashboardError, DashboardView, OutputFormat,
    TariffBand, ViewMode,
};

/// Width of the longest bar in characters
const BAR_WIDTH: f64 = 40.0;

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pun_dashboard={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn bar(price: f64, axis: Option<AxisDomain>) -> String {
    let fraction = match axis {
        Some(axis) if axis.max > axis.min => (price - axis.min) / (axis.max - axis.min),
        _ => 1.0,
    };
    let len = (fraction.clamp(0.0, 1.0) * BAR_WIDTH).round() as usize;
    "█".repeat(len.max(1))
}

fn fmt_price(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2} €/MWh", v),
        None => "n/d".to_string(),
    }
}

fn render_header(out: &mut String, view: &DashboardView) -> std::fmt::Result {
    writeln!(out, "Prezzo Medio Orario PUN")?;
    writeln!(
        out,
        "Andamento del Prezzo Unico Nazionale dell'energia elettrica in Italia"
    )?;
    writeln!(out)?;

    let source = if view.dataset.imported {
        "CSV"
    } else {
        "dati di esempio"
    };
    writeln!(
        out,
        "Dati: {} righe ({} giorni), {}",
        view.dataset.rows, view.dataset.days, source
    )?;

    if let Some(err) = &view.error {
        writeln!(out, "{}", err)?;
    }

    match view.view_mode {
        ViewMode::Single => {
            writeln!(
                out,
                "Modalità: Singolo | Data: {}",
                format_date_long(&view.selected_date)
            )?;
        }
        ViewMode::Range => {
            let range = &view.date_range;
            let label = if range.is_complete() {
                format!(
                    "{} - {}",
                    format_date_long(&range.start),
                    format_date_long(&range.end)
                )
            } else if !range.start.is_empty() {
                format!("Dal {} - Seleziona fine", format_date_long(&range.start))
            } else {
                "Seleziona periodo".to_string()
            };
            write!(out, "Modalità: Periodo (Media Oraria) | {}", label)?;
            match view.range_days {
                Some(days) => writeln!(out, " ({} giorni)", days)?,
                None => writeln!(out)?,
            }
        }
    }
    writeln!(out)
}

fn render_series(out: &mut String, view: &DashboardView) -> std::fmt::Result {
    writeln!(out, "Prezzi orari")?;
    if view.series.is_empty() {
        writeln!(out, "  Nessun dato per la selezione corrente")?;
    }

    for row in &view.series {
        write!(
            out,
            "  {} {} {:>8.2} {}",
            row.hour_label,
            row.band,
            row.price,
            bar(row.price, view.axis)
        )?;
        match row.sample_count {
            Some(n) => writeln!(out, "  (media su {} giorni)", n)?,
            None => writeln!(out)?,
        }
    }
    writeln!(out)
}

fn render_stats(out: &mut String, view: &DashboardView) -> std::fmt::Result {
    let Some(stats) = &view.stats else {
        return Ok(());
    };

    writeln!(out, "Statistiche")?;
    writeln!(out, "  Minimo:     {}", fmt_price(Some(stats.min)))?;
    writeln!(out, "  Massimo:    {}", fmt_price(Some(stats.max)))?;
    writeln!(out, "  Media:      {}", fmt_price(Some(stats.average)))?;
    writeln!(out, "  Escursione: {}", fmt_price(Some(stats.range)))?;
    for band in TariffBand::ALL {
        writeln!(
            out,
            "  {:<17} {}",
            band.display_name(),
            fmt_price(stats.band_average(band))
        )?;
    }
    writeln!(out)
}

fn render_overview(out: &mut String, view: &DashboardView) -> std::fmt::Result {
    writeln!(out, "Panoramica giornaliera")?;

    let max = view
        .daily
        .iter()
        .map(|d| d.average)
        .fold(f64::NEG_INFINITY, f64::max);
    let axis = (max > 0.0).then_some(AxisDomain { min: 0.0, max });

    for day in &view.daily {
        let marker = if day.is_selected { '*' } else { ' ' };
        writeln!(
            out,
            " {}{} {:>8.2} {}",
            marker,
            day.label,
            day.average,
            bar(day.average, axis)
        )?;
    }
    writeln!(out)
}

fn render_calendar(out: &mut String, calendar: &CalendarModel) -> std::fmt::Result {
    if calendar.days.is_empty() {
        return Ok(());
    }

    writeln!(
        out,
        "{} {} {}",
        if calendar.can_prev { '<' } else { ' ' },
        calendar.month_label,
        if calendar.can_next { '>' } else { ' ' }
    )?;
    writeln!(out, "{}", calendar.position_label)?;
    if let Some(prompt) = calendar.range_prompt {
        writeln!(out, "{}", prompt)?;
    }

    for header in WEEKDAY_HEADERS {
        write!(out, "  {}  ", header)?;
    }
    writeln!(out)?;

    for week in calendar.days.chunks(7) {
        for cell in week {
            if cell.is_empty {
                write!(out, "     ")?;
            } else if cell.selected {
                write!(out, "[{:>2}] ", cell.day)?;
            } else if cell.available {
                write!(out, " {:>2}* ", cell.day)?;
            } else {
                write!(out, " {:>2}  ", cell.day)?;
            }
        }
        writeln!(out)?;
    }
    writeln!(out)
}

fn render_text(view: &DashboardView) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    render_header(&mut out, view)?;
    render_series(&mut out, view)?;
    render_stats(&mut out, view)?;
    render_overview(&mut out, view)?;
    render_calendar(&mut out, &view.calendar)?;
    Ok(out)
}

fn run(config: &DashboardConfig) -> Result<bool, DashboardError> {
    let state = config.build_state();

    if config.dump_csv {
        print!("{}", write_pun_csv(state.rows())?);
        return Ok(state.error().is_none());
    }

    let view = state.view();
    match config.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
        OutputFormat::Text => {
            let text = render_text(&view).map_err(|e| DashboardError::Output(e.to_string()))?;
            print!("{}", text);
        }
    }

    Ok(view.error.is_none())
}

fn main() -> ExitCode {
    let config = DashboardConfig::parse();
    init_logging(&config.log_level);

    match run(&config) {
        Ok(true) => ExitCode::SUCCESS,
        // Import failed, sample data was rendered instead
        Ok(false) => ExitCode::from(2),
        Err(e) => {
            error!(error = %e, "pun-dashboard failed");
            ExitCode::FAILURE
        }
    }
}
