mod common;
use common::{memory_store, utc};

use chrono::Utc;
use rjobcost::core::calculator::rollup::ProposalSection;
use rjobcost::core::catalog::CatalogLogic;
use rjobcost::core::entries::{EntryLogic, NewTimeEntry, TimeEntryEdit};
use rjobcost::core::financial::{Placement, RowLogic};
use rjobcost::core::logic::Core;
use rjobcost::db::JobStore;
use rjobcost::db::log::load_log;
use rjobcost::errors::AppError;
use rjobcost::models::{
    Category, CrewSelection, FinancialRowInput, FinancialRowPatch, NewMaterialItem, Session,
};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

fn input(category: Category, description: &str, qty: f64, unit: f64, markup: f64) -> FinancialRowInput {
    FinancialRowInput {
        category,
        description: description.to_string(),
        quantity: Some(qty),
        unit_cost: Some(unit),
        markup_percent: Some(markup),
        notes: None,
    }
}

fn entry(component: Option<i64>, start_h: u32, end_h: u32, crew: CrewSelection) -> NewTimeEntry {
    NewTimeEntry {
        job_id: 1,
        component_id: component,
        start: utc(2025, 3, 10, start_h, 0),
        end: Some(utc(2025, 3, 10, end_h, 0)),
        hours: None,
        crew,
        notes: None,
    }
}

#[test]
fn report_rolls_up_component_and_clock_in_time() {
    let mut store = memory_store();
    let office = Session::office(1);

    CatalogLogic::set_estimate(&mut store, &office, 1, Some(64.0)).unwrap();
    // 8 h × 3 on Framing, 4 h × 2 clock-in
    EntryLogic::record(&mut store, &office, entry(Some(1), 7, 15, CrewSelection::Count(3))).unwrap();
    EntryLogic::record(
        &mut store,
        &office,
        entry(None, 15, 19, CrewSelection::Workers(vec!["Bob".into(), "Carl".into()])),
    )
    .unwrap();

    let report = Core::build_job_report_in(&store, 1, 0.0, &Utc).unwrap();

    assert!(close(report.total_man_hours, 32.0));
    assert!(close(report.clock_in_man_hours, 8.0));

    assert_eq!(report.by_date.len(), 1);
    let day = &report.by_date[0];
    assert!(close(day.component_work.man_hours, 24.0));
    assert!(close(day.generic_time.man_hours, 8.0));
    assert_eq!(day.total_entries, 2);

    assert_eq!(report.by_component.len(), 2);
    assert_eq!(report.by_component[0].name, "Framing");
    assert!(close(report.by_component[0].total_hours, 8.0));
    let shares: f64 = report.by_component.iter().map(|c| c.share_pct).sum();
    assert!(close(shares, 100.0));

    assert_eq!(report.by_user.len(), 1);
    assert_eq!(report.by_user[0].name, "Alice");
    assert!(close(report.by_user[0].total_hours, 12.0));

    // progress counts clock-in man-hours only: 8 of 64
    let p = report.progress.unwrap();
    assert!(close(p.percent, 12.5));
    assert!(!p.is_over_budget);
    assert!(report.labor_budget_progress.is_none());
}

#[test]
fn rows_are_placed_by_fractional_keys() {
    let mut store = memory_store();
    let office = Session::office(1);

    for name in ["Lumber", "Nails", "Paint"] {
        RowLogic::create(
            &mut store,
            &office,
            1,
            input(Category::Materials, name, 1.0, 10.0, 0.0),
            Placement::Append,
        )
        .unwrap();
    }
    let inserted = RowLogic::create(
        &mut store,
        &office,
        1,
        input(Category::Other, "Permit", 1.0, 50.0, 0.0),
        Placement::After(0),
    )
    .unwrap();
    assert!(close(inserted.order_index, 0.5));

    let order: Vec<String> = RowLogic::list(&store, 1)
        .unwrap()
        .into_iter()
        .map(|r| r.description)
        .collect();
    assert_eq!(order, vec!["Lumber", "Permit", "Nails", "Paint"]);

    // editing keeps the key
    let edited = RowLogic::update(
        &mut store,
        &office,
        inserted.id,
        FinancialRowPatch {
            quantity: Some(2.0),
            ..Default::default()
        },
    )
    .unwrap();
    assert!(close(edited.order_index, 0.5));
    assert!(close(edited.total_cost, 100.0));
}

#[test]
fn collapsed_keys_are_renumbered_and_order_is_kept() {
    let mut store = memory_store();
    let office = Session::office(1);

    for name in ["A", "B", "C"] {
        RowLogic::create(
            &mut store,
            &office,
            1,
            input(Category::Other, name, 1.0, 1.0, 0.0),
            Placement::Append,
        )
        .unwrap();
    }
    // keep inserting right after "B" until the midpoint runs out of precision
    for i in 0..80 {
        let row = RowLogic::create(
            &mut store,
            &office,
            1,
            input(Category::Other, &format!("x{i}"), 1.0, 1.0, 0.0),
            Placement::After(1),
        )
        .unwrap();
        let rows = RowLogic::list(&store, 1).unwrap();
        assert_eq!(rows[2].id, row.id);
    }

    let rows = RowLogic::list(&store, 1).unwrap();
    assert_eq!(rows.len(), 83);
    assert_eq!(rows[0].description, "A");
    assert_eq!(rows[1].description, "B");
    assert_eq!(rows[2].description, "x79");
    assert_eq!(rows[82].description, "C");
    for pair in rows.windows(2) {
        assert!(pair[0].order_index < pair[1].order_index);
    }

    let log = load_log(&store.conn).unwrap();
    assert!(log.iter().any(|(_, _, op, _, _)| op == "row_renumber"));
}

#[test]
fn rejected_rows_leave_the_store_untouched() {
    let mut store = memory_store();
    let office = Session::office(1);

    let mut missing_qty = input(Category::Labor, "Crew", 0.0, 45.0, 0.0);
    missing_qty.quantity = None;
    let err = RowLogic::create(&mut store, &office, 1, missing_qty, Placement::Append).unwrap_err();
    assert!(matches!(err, AppError::MissingField("quantity")));

    let nan_cost = input(Category::Labor, "Crew", 1.0, f64::NAN, 0.0);
    let err = RowLogic::create(&mut store, &office, 1, nan_cost, Placement::Append).unwrap_err();
    assert!(matches!(err, AppError::InvalidNumber { field: "unit_cost", .. }));

    assert!(store.financial_rows(1).unwrap().is_empty());
}

#[test]
fn crew_sessions_cannot_touch_financials() {
    let mut store = memory_store();
    let crew = Session::crew(1);

    let err = RowLogic::create(
        &mut store,
        &crew,
        1,
        input(Category::Materials, "Lumber", 1.0, 10.0, 0.0),
        Placement::Append,
    )
    .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let err = RowLogic::set_labor_rate(&mut store, &crew, 1, Some(40.0)).unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
    assert!(store.labor_pricing(1).unwrap().is_none());
}

#[test]
fn crew_edits_only_their_own_entries() {
    let mut store = memory_store();
    store.insert_user("Bob").unwrap();
    let alice = Session::crew(1);
    let bob = Session::crew(2);

    let e = EntryLogic::record(&mut store, &alice, entry(Some(1), 7, 11, CrewSelection::Count(1))).unwrap();

    let err = EntryLogic::edit(
        &mut store,
        &bob,
        e.id,
        TimeEntryEdit {
            hours: Some(2.0),
            ..Default::default()
        },
    )
    .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let edited = EntryLogic::edit(
        &mut store,
        &alice,
        e.id,
        TimeEntryEdit {
            hours: Some(2.0),
            ..Default::default()
        },
    )
    .unwrap();
    assert!(close(edited.total_hours, 2.0));
    assert!(edited.is_manual);
}

#[test]
fn timestamp_edit_recomputes_rounded_hours() {
    let mut store = memory_store();
    let office = Session::office(1);

    let e = EntryLogic::record(&mut store, &office, entry(Some(1), 7, 15, CrewSelection::Count(2))).unwrap();
    assert!(close(e.total_hours, 8.0));
    assert!(!e.is_manual);

    // 07:00 → 15:08 rounds to 8.25
    let edited = EntryLogic::edit(
        &mut store,
        &office,
        e.id,
        TimeEntryEdit {
            end: Some(utc(2025, 3, 10, 15, 8)),
            ..Default::default()
        },
    )
    .unwrap();
    assert!(close(edited.total_hours, 8.25));
    assert!(close(edited.man_hours(), 16.5));

    let stored = store.time_entry(e.id).unwrap();
    assert!(close(stored.total_hours, 8.25));

    let err = EntryLogic::edit(
        &mut store,
        &office,
        e.id,
        TimeEntryEdit {
            end: Some(utc(2025, 3, 10, 6, 0)),
            ..Default::default()
        },
    )
    .unwrap_err();
    assert!(matches!(err, AppError::InvalidTimeRange { .. }));

    let after = store.time_entry(e.id).unwrap();
    assert_eq!(after, stored);
    assert_eq!(after.end, Some(utc(2025, 3, 10, 15, 8)));
}

#[test]
fn rejected_row_edit_keeps_the_stored_row() {
    let mut store = memory_store();
    let office = Session::office(1);

    let row = RowLogic::create(
        &mut store,
        &office,
        1,
        input(Category::Equipment, "Lift", 2.0, 100.0, 10.0),
        Placement::Append,
    )
    .unwrap();

    let patch = FinancialRowPatch {
        quantity: Some(5.0),
        unit_cost: Some(f64::NAN),
        ..Default::default()
    };
    let err = RowLogic::update(&mut store, &office, row.id, patch).unwrap_err();
    assert!(matches!(err, AppError::InvalidNumber { field: "unit_cost", .. }));

    let stored = store.financial_row(row.id).unwrap();
    assert_eq!(stored, row);
    assert!(close(stored.quantity, 2.0));
    assert!(close(stored.selling_price, 220.0));
}

#[test]
fn malformed_worker_list_fails_the_read() {
    let mut store = memory_store();
    let office = Session::office(1);

    let e = EntryLogic::record(
        &mut store,
        &office,
        entry(None, 7, 15, CrewSelection::Workers(vec!["Bob".into(), "Carl".into()])),
    )
    .unwrap();
    store
        .conn
        .execute(
            "UPDATE time_entries SET worker_names = 'Bob, Carl' WHERE id = ?1",
            [e.id],
        )
        .unwrap();

    assert!(store.time_entry(e.id).is_err());
    assert!(Core::build_job_report(&store, 1, 0.0).is_err());
}

#[test]
fn empty_worker_selection_is_rejected() {
    let mut store = memory_store();
    let office = Session::office(1);

    let err = EntryLogic::record(
        &mut store,
        &office,
        entry(Some(1), 7, 15, CrewSelection::Workers(vec!["  ".into()])),
    )
    .unwrap_err();
    assert!(matches!(err, AppError::EmptyCrewSelection));
    assert!(store.time_entries(1).unwrap().is_empty());
}

#[test]
fn proposal_marks_up_rows_but_not_labor() {
    let mut store = memory_store();
    let office = Session::office(1);

    RowLogic::create(
        &mut store,
        &office,
        1,
        input(Category::Subcontractor, "Electrician", 10.0, 60.0, 20.0),
        Placement::Append,
    )
    .unwrap();
    RowLogic::create(
        &mut store,
        &office,
        1,
        input(Category::Labor, "Crew", 16.0, 40.0, 0.0),
        Placement::Append,
    )
    .unwrap();

    let report = Core::build_job_report_in(&store, 1, 15.0, &Utc).unwrap();
    let lines = &report.proposal.lines;
    assert_eq!(lines.len(), 2);

    // 600 → 720 with the row markup → 828 with the job markup, 7% tax
    assert_eq!(lines[0].section, ProposalSection::Row);
    assert!(close(lines[0].amount.price, 828.0));
    assert!(close(lines[0].amount.tax, 57.96));
    assert!(close(lines[0].amount.total, 885.96));

    assert_eq!(lines[1].category, Category::Labor);
    assert!(close(lines[1].amount.price, 640.0));
    assert!(close(lines[1].amount.tax, 0.0));

    assert!(close(report.costs.budgeted_labor_hours, 16.0));
    assert!(close(report.proposal.grand_total, 885.96 + 640.0));
}

#[test]
fn labor_rows_are_never_marked_up() {
    let mut store = memory_store();
    let office = Session::office(1);

    let row = RowLogic::create(
        &mut store,
        &office,
        1,
        input(Category::Labor, "Crew", 10.0, 50.0, 30.0),
        Placement::Append,
    )
    .unwrap();
    assert!(close(row.selling_price, 500.0));

    let report = Core::build_job_report_in(&store, 1, 15.0, &Utc).unwrap();
    let line = &report.proposal.lines[0];
    assert_eq!(line.category, Category::Labor);
    assert!(close(line.amount.price, 500.0));
    assert!(close(line.amount.total, 500.0));

    assert!(close(report.costs.financial_price, 500.0));
    assert!(close(report.costs.totals.profit, 0.0));

    // switching an equipment row to labor drops its markup too
    let lift = RowLogic::create(
        &mut store,
        &office,
        1,
        input(Category::Equipment, "Lift", 2.0, 100.0, 10.0),
        Placement::Append,
    )
    .unwrap();
    let patch = FinancialRowPatch {
        category: Some(Category::Labor),
        ..Default::default()
    };
    let edited = RowLogic::update(&mut store, &office, lift.id, patch).unwrap();
    assert!(close(edited.selling_price, 200.0));
}

#[test]
fn costs_combine_rows_materials_and_clocked_labor() {
    let mut store = memory_store();
    let office = Session::office(1);

    RowLogic::create(
        &mut store,
        &office,
        1,
        input(Category::Equipment, "Lift", 2.0, 100.0, 10.0),
        Placement::Append,
    )
    .unwrap();
    RowLogic::set_labor_rate(&mut store, &office, 1, Some(50.0)).unwrap();
    EntryLogic::record(&mut store, &office, entry(None, 7, 11, CrewSelection::Count(2))).unwrap();

    let old = CatalogLogic::add_workbook(&mut store, &office, 1, "Old takeoff").unwrap();
    let old_sheet = CatalogLogic::add_sheet(&mut store, &office, old, "Old").unwrap();
    CatalogLogic::add_item(
        &mut store,
        &office,
        NewMaterialItem {
            sheet_id: old_sheet,
            category: "Lumber".into(),
            description: "2x4".into(),
            quantity: 1000.0,
            cost_per_unit: 1.0,
            price_per_unit: 2.0,
        },
    )
    .unwrap();

    let wb = CatalogLogic::add_workbook(&mut store, &office, 1, "Takeoff").unwrap();
    let sheet = CatalogLogic::add_sheet(&mut store, &office, wb, "Walls").unwrap();
    CatalogLogic::add_item(
        &mut store,
        &office,
        NewMaterialItem {
            sheet_id: sheet,
            category: String::new(),
            description: "Drywall".into(),
            quantity: 10.0,
            cost_per_unit: 12.0,
            price_per_unit: 15.0,
        },
    )
    .unwrap();

    let report = Core::build_job_report_in(&store, 1, 0.0, &Utc).unwrap();
    let costs = &report.costs;

    // only the newest active workbook counts
    assert_eq!(costs.materials.sheets.len(), 1);
    assert_eq!(costs.materials.sheets[0].categories[0].category, "Uncategorized");
    assert!(close(costs.materials.cost, 120.0));
    assert!(close(costs.materials.price, 150.0));

    assert!(close(costs.financial_cost, 200.0));
    assert!(close(costs.financial_price, 220.0));

    // 4 h × 2 = 8 man-hours at 50
    assert!(close(costs.labor.cost, 400.0));

    assert!(close(costs.totals.total_cost, 720.0));
    assert!(close(costs.totals.total_price, 770.0));
    assert!(close(costs.totals.profit, 50.0));

    CatalogLogic::archive_workbook(&mut store, &office, wb).unwrap();
    let report = Core::build_job_report_in(&store, 1, 0.0, &Utc).unwrap();
    assert_eq!(report.costs.materials.sheets[0].sheet_name, "Old");
}

#[test]
fn unknown_job_is_not_found() {
    let store = memory_store();
    let err = Core::build_job_report(&store, 99, 0.0).unwrap_err();
    assert!(matches!(err, AppError::NotFound { id: 99, .. }));
}
