use crate::db::log::audit_or_warn;
use crate::db::store::JobStore;
use crate::errors::{AppError, AppResult};
use crate::models::{NewMaterialItem, Session};

/// Setup records a job needs before the engine has anything to roll up:
/// jobs, components, users and material workbooks.
pub struct CatalogLogic;

fn required_name(name: &str) -> AppResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::MissingField("name"));
    }
    Ok(trimmed.to_string())
}

fn non_negative(field: &'static str, value: f64) -> AppResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(AppError::InvalidNumber { field, value })
    }
}

impl CatalogLogic {
    pub fn add_job<S: JobStore + ?Sized>(
        store: &mut S,
        session: &Session,
        name: &str,
        estimated_hours: Option<f64>,
    ) -> AppResult<i64> {
        session.require_office("create job")?;
        let name = required_name(name)?;
        let estimate = estimated_hours
            .map(|h| non_negative("estimated_hours", h))
            .transpose()?;

        let id = store.insert_job(&name, estimate)?;
        audit_or_warn(
            store,
            "job_add",
            &format!("job {}", id),
            &format!("Created job '{}'", name),
        );
        Ok(id)
    }

    /// `None` or `0` removes the budget.
    pub fn set_estimate<S: JobStore + ?Sized>(
        store: &mut S,
        session: &Session,
        job_id: i64,
        hours: Option<f64>,
    ) -> AppResult<()> {
        session.require_office("set job estimate")?;
        let hours = hours
            .map(|h| non_negative("estimated_hours", h))
            .transpose()?
            .filter(|h| *h > 0.0);

        store.set_estimated_hours(job_id, hours)?;
        audit_or_warn(
            store,
            "job_estimate",
            &format!("job {}", job_id),
            &match hours {
                Some(h) => format!("Estimated hours set to {:.2}", h),
                None => "Estimated hours cleared".to_string(),
            },
        );
        Ok(())
    }

    pub fn add_component<S: JobStore + ?Sized>(
        store: &mut S,
        session: &Session,
        job_id: i64,
        name: &str,
        is_task: bool,
    ) -> AppResult<i64> {
        session.require_office("create component")?;
        let name = required_name(name)?;
        store.job(job_id)?;

        let id = store.insert_component(job_id, &name, is_task)?;
        audit_or_warn(
            store,
            "component_add",
            &format!("component {}", id),
            &format!("Added '{}' to job {}", name, job_id),
        );
        Ok(id)
    }

    pub fn set_component_active<S: JobStore + ?Sized>(
        store: &mut S,
        session: &Session,
        component_id: i64,
        active: bool,
    ) -> AppResult<()> {
        session.require_office("change component")?;
        store.set_component_active(component_id, active)?;
        audit_or_warn(
            store,
            "component_edit",
            &format!("component {}", component_id),
            if active { "Activated" } else { "Deactivated" },
        );
        Ok(())
    }

    pub fn add_user<S: JobStore + ?Sized>(
        store: &mut S,
        session: &Session,
        name: &str,
    ) -> AppResult<i64> {
        session.require_office("create user")?;
        let name = required_name(name)?;
        let id = store.insert_user(&name)?;
        audit_or_warn(
            store,
            "user_add",
            &format!("user {}", id),
            &format!("Added user '{}'", name),
        );
        Ok(id)
    }

    /// New active workbook for a job. Older active workbooks stay active but
    /// the newest one is the one the breakdown reads.
    pub fn add_workbook<S: JobStore + ?Sized>(
        store: &mut S,
        session: &Session,
        job_id: i64,
        name: &str,
    ) -> AppResult<i64> {
        session.require_office("create material workbook")?;
        let name = required_name(name)?;
        store.job(job_id)?;
        let id = store.insert_material_workbook(job_id, &name)?;
        audit_or_warn(
            store,
            "workbook_add",
            &format!("workbook {}", id),
            &format!("Created workbook '{}' for job {}", name, job_id),
        );
        Ok(id)
    }

    pub fn archive_workbook<S: JobStore + ?Sized>(
        store: &mut S,
        session: &Session,
        workbook_id: i64,
    ) -> AppResult<()> {
        session.require_office("archive material workbook")?;
        store.archive_material_workbook(workbook_id)?;
        audit_or_warn(store, "workbook_archive", &format!("workbook {}", workbook_id), "Archived");
        Ok(())
    }

    pub fn add_sheet<S: JobStore + ?Sized>(
        store: &mut S,
        session: &Session,
        workbook_id: i64,
        name: &str,
    ) -> AppResult<i64> {
        session.require_office("create material sheet")?;
        let name = required_name(name)?;
        let id = store.insert_material_sheet(workbook_id, &name)?;
        audit_or_warn(
            store,
            "sheet_add",
            &format!("sheet {}", id),
            &format!("Added sheet '{}' to workbook {}", name, workbook_id),
        );
        Ok(id)
    }

    pub fn add_item<S: JobStore + ?Sized>(
        store: &mut S,
        session: &Session,
        item: NewMaterialItem,
    ) -> AppResult<i64> {
        session.require_office("create material item")?;
        non_negative("quantity", item.quantity)?;
        non_negative("cost_per_unit", item.cost_per_unit)?;
        non_negative("price_per_unit", item.price_per_unit)?;

        let id = store.insert_material_item(&item)?;
        audit_or_warn(
            store,
            "item_add",
            &format!("item {}", id),
            &format!(
                "{} × '{}' on sheet {} (cost {:.2}, price {:.2})",
                item.quantity, item.description, item.sheet_id, item.cost_per_unit, item.price_per_unit
            ),
        );
        Ok(id)
    }
}
