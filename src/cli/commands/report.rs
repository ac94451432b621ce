use crate::cli::commands::open_pool;
use crate::cli::parser::{Commands, GroupBy};
use crate::config::Config;
use crate::core::calculator::progress::Progress;
use crate::core::logic::Core;
use crate::errors::AppResult;
use crate::models::JobReport;
use crate::ui::messages::{header, info};
use crate::utils::colors::{CYAN, RESET, color_for_amount, color_for_progress};
use crate::utils::formatting::{bold, fmt_pct};
use crate::utils::table::{Column, Table};
use crate::utils::{fmt_hours, fmt_money};

/// Handle `summary`, `costs`, `proposal` and `progress`.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let pool = open_pool(cfg)?;

    match cmd {
        Commands::Summary { job, by } => {
            let report = Core::build_job_report(&pool, *job, cfg.default_markup_percent)?;
            header(format!("Job {}: {}", report.job.id, report.job.name));
            match by {
                Some(GroupBy::Date) => print_by_date(&report, cfg),
                Some(GroupBy::Component) => print_by_component(&report, cfg),
                Some(GroupBy::User) => print_by_user(&report, cfg),
                None => {
                    print_by_date(&report, cfg);
                    print_by_component(&report, cfg);
                    print_by_user(&report, cfg);
                }
            }
            println!(
                "{}Total man-hours:{} {}",
                CYAN,
                RESET,
                bold(&fmt_hours(report.total_man_hours))
            );
        }
        Commands::Costs { job } => {
            let report = Core::build_job_report(&pool, *job, cfg.default_markup_percent)?;
            header(format!("Costs of job {}: {}", report.job.id, report.job.name));
            print_costs(&report, cfg);
        }
        Commands::Proposal { job, markup } => {
            let markup = markup.unwrap_or(cfg.default_markup_percent);
            let report = Core::build_job_report(&pool, *job, markup)?;
            header(format!("Proposal for job {}: {}", report.job.id, report.job.name));
            print_proposal(&report, cfg);
        }
        Commands::Progress { job } => {
            let report = Core::build_job_report(&pool, *job, cfg.default_markup_percent)?;
            header(format!("Progress of job {}: {}", report.job.id, report.job.name));
            print_progress("Estimate", report.progress.as_ref());
            print_progress("Labor budget", report.labor_budget_progress.as_ref());
        }
        _ => {}
    }

    Ok(())
}

fn print_by_date(report: &JobReport, cfg: &Config) {
    println!("{}By date{}", CYAN, RESET);
    if report.by_date.is_empty() {
        info("No time entries.");
        return;
    }
    let mut t = Table::new(
        vec![
            Column::left("Date"),
            Column::right("Entries"),
            Column::right("Component man-h"),
            Column::right("Clock-in man-h"),
            Column::right("Total man-h"),
        ],
        &cfg.separator_char,
    );
    for d in &report.by_date {
        t.add_row(vec![
            d.date.format("%Y-%m-%d (%a)").to_string(),
            d.total_entries.to_string(),
            format!("{:.2}", d.component_work.man_hours),
            format!("{:.2}", d.generic_time.man_hours),
            format!("{:.2}", d.total_man_hours),
        ]);
    }
    t.print();
    println!();
}

fn print_by_component(report: &JobReport, cfg: &Config) {
    println!("{}By component{}", CYAN, RESET);
    if report.by_component.is_empty() {
        info("No time entries.");
        return;
    }
    let mut t = Table::new(
        vec![
            Column::left("Component"),
            Column::right("Entries"),
            Column::right("Hours"),
            Column::right("Man-h"),
            Column::right("Share"),
        ],
        &cfg.separator_char,
    );
    for c in &report.by_component {
        t.add_row(vec![
            c.name.clone(),
            c.entries.to_string(),
            format!("{:.2}", c.total_hours),
            format!("{:.2}", c.man_hours),
            fmt_pct(c.share_pct),
        ]);
    }
    t.print();
    println!();
}

fn print_by_user(report: &JobReport, cfg: &Config) {
    println!("{}By user{}", CYAN, RESET);
    if report.by_user.is_empty() {
        info("No time entries.");
        return;
    }
    let mut t = Table::new(
        vec![
            Column::left("User / component"),
            Column::right("Entries"),
            Column::right("Hours"),
            Column::right("Man-h"),
        ],
        &cfg.separator_char,
    );
    for u in &report.by_user {
        t.add_row(vec![
            u.name.clone(),
            u.entries.to_string(),
            format!("{:.2}", u.total_hours),
            format!("{:.2}", u.man_hours),
        ]);
        for c in &u.components {
            t.add_row(vec![
                format!("  └ {}", c.name),
                c.entries.to_string(),
                format!("{:.2}", c.total_hours),
                String::new(),
            ]);
        }
    }
    t.print();
    println!();
}

fn print_costs(report: &JobReport, cfg: &Config) {
    let costs = &report.costs;

    println!("{}Financial rows{}", CYAN, RESET);
    let mut t = Table::new(
        vec![
            Column::left("Category"),
            Column::right("Rows"),
            Column::right("Qty"),
            Column::right("Cost"),
            Column::right("Price"),
        ],
        &cfg.separator_char,
    );
    for c in &costs.categories {
        t.add_row(vec![
            c.category.label().to_string(),
            c.rows.to_string(),
            format!("{}", c.quantity),
            fmt_money(c.total_cost),
            fmt_money(c.total_price),
        ]);
    }
    t.add_row(vec![
        "Total".to_string(),
        String::new(),
        String::new(),
        fmt_money(costs.financial_cost),
        fmt_money(costs.financial_price),
    ]);
    t.print();
    println!();

    println!("{}Materials{}", CYAN, RESET);
    if costs.materials.sheets.is_empty() {
        info("No active material workbook.");
    } else {
        let mut t = Table::new(
            vec![
                Column::left("Sheet / category"),
                Column::right("Items"),
                Column::right("Cost"),
                Column::right("Price"),
            ],
            &cfg.separator_char,
        );
        for s in &costs.materials.sheets {
            t.add_row(vec![
                s.sheet_name.clone(),
                s.items.to_string(),
                fmt_money(s.cost),
                fmt_money(s.price),
            ]);
            for c in &s.categories {
                t.add_row(vec![
                    format!("  └ {}", c.category),
                    c.items.to_string(),
                    fmt_money(c.cost),
                    fmt_money(c.price),
                ]);
            }
        }
        t.print();
    }
    println!();

    println!("{}Clocked labor{}", CYAN, RESET);
    let labor = &costs.labor;
    println!(
        "{} × {} / h = {} (billed {})",
        fmt_hours(labor.man_hours),
        fmt_money(labor.hourly_rate),
        fmt_money(labor.cost),
        fmt_money(labor.price)
    );
    println!("Budgeted labor hours: {}", fmt_hours(costs.budgeted_labor_hours));
    println!();

    let totals = &costs.totals;
    println!("{}Total cost:{}  {}", CYAN, RESET, bold(&fmt_money(totals.total_cost)));
    println!("{}Total price:{} {}", CYAN, RESET, bold(&fmt_money(totals.total_price)));
    println!(
        "{}Profit:{}      {}{}{} ({})",
        CYAN,
        RESET,
        color_for_amount(totals.profit),
        fmt_money(totals.profit),
        RESET,
        fmt_pct(totals.margin_pct)
    );
}

fn print_proposal(report: &JobReport, cfg: &Config) {
    let proposal = &report.proposal;
    if proposal.lines.is_empty() {
        info("Nothing to propose yet.");
        return;
    }

    let mut t = Table::new(
        vec![
            Column::left("Line"),
            Column::left("Category"),
            Column::right("Base"),
            Column::right("Price"),
            Column::right("Tax"),
            Column::right("Total"),
        ],
        &cfg.separator_char,
    );
    for l in &proposal.lines {
        t.add_row(vec![
            l.label.clone(),
            l.category.label().to_string(),
            fmt_money(l.amount.cost),
            fmt_money(l.amount.price),
            fmt_money(l.amount.tax),
            fmt_money(l.amount.total),
        ]);
    }
    t.print();
    println!();
    println!("{}Markup:{}      {}", CYAN, RESET, fmt_pct(proposal.markup_percent));
    println!("{}Subtotal:{}    {}", CYAN, RESET, fmt_money(proposal.subtotal));
    println!("{}Tax:{}         {}", CYAN, RESET, fmt_money(proposal.total_tax));
    println!(
        "{}Grand total:{} {}",
        CYAN,
        RESET,
        bold(&fmt_money(proposal.grand_total))
    );
}

fn print_progress(label: &str, progress: Option<&Progress>) {
    match progress {
        None => println!("{}{}:{} no budget set", CYAN, label, RESET),
        Some(p) => {
            let color = color_for_progress(p.percent, p.is_over_budget);
            let over = if p.is_over_budget { " (over budget)" } else { "" };
            println!(
                "{}{}:{} {} of {} {}{}{}{}",
                CYAN,
                label,
                RESET,
                fmt_hours(p.clocked_man_hours),
                fmt_hours(p.budget_hours),
                color,
                fmt_pct(p.percent),
                over,
                RESET
            );
        }
    }
}
