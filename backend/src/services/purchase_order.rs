//! Purchase-order lifecycle service
//!
//! Owns order headers and lines. Header aggregates (item count, main item
//! name, supplier label, total price) are recomputed from the lines inside
//! the same transaction as every line mutation, so they never drift. Status
//! changes use a compare-and-set on the expected status, so two concurrent
//! transitions cannot both win.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use shared::models::cart::{SUPPLIER_MIXED, SUPPLIER_UNSPECIFIED};
use shared::models::{generate_order_code, OrderPriority, OrderStatus, PurchaseOrder, PurchaseOrderLine};
use shared::types::{PaginatedResponse, Pagination, PaginationMeta};
use shared::validation;

/// Attempts at a fresh order code before giving up on a collision
const ORDER_CODE_ATTEMPTS: u32 = 3;

/// Attempts at a status compare-and-set before surfacing a conflict
const STATUS_CAS_ATTEMPTS: u32 = 3;

/// Purchase-order service
#[derive(Clone)]
pub struct PurchaseOrderService {
    db: PgPool,
}

/// One submitted order line
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineInput {
    pub store_material_id: Uuid,
    pub count: i32,
    pub unit_price: Option<Decimal>,
}

/// Input for creating a purchase order
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderInput {
    #[serde(rename = "items")]
    pub lines: Vec<OrderLineInput>,
    pub priority: Option<OrderPriority>,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
    pub order_date: Option<NaiveDate>,
}

/// Input for replacing the lines and metadata of a pending order
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderInput {
    #[serde(rename = "items")]
    pub lines: Vec<OrderLineInput>,
    pub priority: Option<OrderPriority>,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

/// Input for a status transition
#[derive(Debug, Deserialize)]
pub struct UpdateStatusInput {
    pub status: OrderStatus,
}

/// Query parameters for listing orders
#[derive(Debug, Default, Deserialize)]
pub struct OrderListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub status: Option<OrderStatus>,
    /// "orderCode", "supplier", "mainItemName" or "all"
    #[serde(rename = "type")]
    pub search_type: Option<String>,
    #[serde(rename = "s")]
    pub keyword: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Order header with its lines
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrderDetail {
    pub order: PurchaseOrder,
    pub lines: Vec<PurchaseOrderLine>,
}

/// Row shape of the order header
#[derive(Debug, FromRow)]
struct OrderRow {
    id: Uuid,
    store_id: Uuid,
    order_code: String,
    supplier: String,
    main_item_name: Option<String>,
    item_count: i32,
    priority: String,
    notes: Option<String>,
    status: String,
    order_date: NaiveDate,
    actual_delivery_date: Option<NaiveDate>,
    total_price: Decimal,
    created_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_model(self) -> AppResult<PurchaseOrder> {
        let status = self
            .status
            .parse::<OrderStatus>()
            .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?;
        let priority = self
            .priority
            .parse::<OrderPriority>()
            .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?;
        Ok(PurchaseOrder {
            id: self.id,
            store_id: self.store_id,
            order_code: self.order_code,
            supplier: self.supplier,
            main_item_name: self.main_item_name,
            item_count: self.item_count,
            priority,
            notes: self.notes,
            status,
            order_date: self.order_date,
            actual_delivery_date: self.actual_delivery_date,
            total_price: self.total_price,
            created_at: self.created_at,
        })
    }
}

/// Row shape of an order line
#[derive(Debug, FromRow)]
struct LineRow {
    id: Uuid,
    purchase_order_id: Uuid,
    store_material_id: Uuid,
    material_name: String,
    count: i32,
    unit_price: Decimal,
    total_price: Decimal,
}

impl LineRow {
    fn into_model(self) -> PurchaseOrderLine {
        PurchaseOrderLine {
            id: self.id,
            purchase_order_id: self.purchase_order_id,
            store_material_id: self.store_material_id,
            material_name: self.material_name,
            count: self.count,
            unit_price: self.unit_price,
            total_price: self.total_price,
        }
    }
}

/// Catalog material referenced by a submitted line
#[derive(Debug, FromRow)]
struct MaterialRef {
    id: Uuid,
    name: String,
    supplier: Option<String>,
    purchase_price: Option<Decimal>,
}

const ORDER_SELECT: &str = r#"
    SELECT id, store_id, order_code, supplier, main_item_name, item_count,
           priority, notes, status, order_date, actual_delivery_date,
           total_price, created_at
    FROM purchase_orders
"#;

const LINE_SELECT: &str = r#"
    SELECT id, purchase_order_id, store_material_id, material_name,
           count, unit_price, total_price
    FROM purchase_order_lines
"#;

impl PurchaseOrderService {
    /// Create a new PurchaseOrderService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a purchase order from submitted lines
    pub async fn create(
        &self,
        store_id: Uuid,
        input: CreateOrderInput,
    ) -> AppResult<PurchaseOrderDetail> {
        input.validate()?;
        let CreateOrderInput {
            lines,
            priority,
            notes,
            order_date,
        } = input;
        let lines = submitted_lines(lines)?;

        let mut tx = self.db.begin().await?;

        let materials = resolve_materials(&mut tx, store_id, &lines).await?;
        let supplier = infer_supplier_label(materials.iter().map(|m| m.supplier.as_deref()));
        let main_item_name = materials.first().map(|m| m.name.clone());
        let order_date = order_date.unwrap_or_else(|| Utc::now().date_naive());
        let priority = priority.unwrap_or_default();

        let total_price: Decimal = lines
            .iter()
            .zip(&materials)
            .map(|(line, material)| {
                line_unit_price(line, material) * Decimal::from(line.count)
            })
            .sum();

        let mut header: Option<OrderRow> = None;
        for _ in 0..ORDER_CODE_ATTEMPTS {
            let order_code = generate_order_code(order_date);
            let inserted = sqlx::query_as::<_, OrderRow>(
                r#"
                INSERT INTO purchase_orders (
                    id, store_id, order_code, supplier, main_item_name, item_count,
                    priority, notes, status, order_date, total_price
                )
                VALUES (gen_random_uuid(), $1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                ON CONFLICT (order_code) DO NOTHING
                RETURNING id, store_id, order_code, supplier, main_item_name, item_count,
                          priority, notes, status, order_date, actual_delivery_date,
                          total_price, created_at
                "#,
            )
            .bind(store_id)
            .bind(&order_code)
            .bind(&supplier)
            .bind(&main_item_name)
            .bind(lines.len() as i32)
            .bind(priority.as_str())
            .bind(&notes)
            .bind(OrderStatus::Pending.as_str())
            .bind(order_date)
            .bind(total_price)
            .fetch_optional(&mut *tx)
            .await?;

            if let Some(row) = inserted {
                header = Some(row);
                break;
            }
        }
        let header = header
            .ok_or_else(|| AppError::Conflict("Could not allocate an order code".to_string()))?;

        for (line_no, (line, material)) in lines.iter().zip(&materials).enumerate() {
            insert_line(&mut tx, header.id, line_no as i32, line, material).await?;
        }

        let lines = fetch_lines(&mut tx, header.id).await?;
        tx.commit().await?;

        let order = header.into_model()?;
        tracing::info!(order_code = %order.order_code, lines = lines.len(), "Created purchase order");

        Ok(PurchaseOrderDetail { order, lines })
    }

    /// List orders for a store, newest first
    ///
    /// Orders with no remaining lines are hidden from the list but stay
    /// addressable by id.
    pub async fn list(
        &self,
        store_id: Uuid,
        query: OrderListQuery,
    ) -> AppResult<PaginatedResponse<PurchaseOrder>> {
        let pagination = Pagination {
            page: query.page.unwrap_or(1).max(1),
            per_page: query.per_page.unwrap_or(20).clamp(1, 100),
        };

        let search_type = match query.search_type.as_deref() {
            None | Some("all") => "all",
            Some(t @ ("orderCode" | "supplier" | "mainItemName")) => t,
            Some(other) => {
                return Err(AppError::Validation {
                    field: "search_type".to_string(),
                    message: format!("Unknown search type: {}", other),
                })
            }
        };
        let keyword = query
            .keyword
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .map(|k| format!("%{}%", k.trim()));

        let filter = r#"
            WHERE store_id = $1
              AND item_count > 0
              AND ($2::text IS NULL OR status = $2)
              AND ($3::date IS NULL OR order_date >= $3)
              AND ($4::date IS NULL OR order_date <= $4)
              AND ($5::text IS NULL OR
                   ($6 = 'orderCode' AND order_code ILIKE $5) OR
                   ($6 = 'supplier' AND supplier ILIKE $5) OR
                   ($6 = 'mainItemName' AND main_item_name ILIKE $5) OR
                   ($6 = 'all' AND (order_code ILIKE $5 OR supplier ILIKE $5
                                    OR main_item_name ILIKE $5)))
        "#;

        let status = query.status.map(|s| s.as_str());

        let count_sql = format!("SELECT COUNT(*) FROM purchase_orders {filter}");
        let total_items = sqlx::query_scalar::<_, i64>(&count_sql)
            .bind(store_id)
            .bind(status)
            .bind(query.start_date)
            .bind(query.end_date)
            .bind(&keyword)
            .bind(search_type)
            .fetch_one(&self.db)
            .await?;

        let page_sql = format!(
            "{ORDER_SELECT} {filter} ORDER BY created_at DESC LIMIT $7 OFFSET $8"
        );
        let rows = sqlx::query_as::<_, OrderRow>(&page_sql)
            .bind(store_id)
            .bind(status)
            .bind(query.start_date)
            .bind(query.end_date)
            .bind(&keyword)
            .bind(search_type)
            .bind(pagination.limit() as i64)
            .bind(pagination.offset() as i64)
            .fetch_all(&self.db)
            .await?;

        let data = rows
            .into_iter()
            .map(OrderRow::into_model)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(PaginatedResponse {
            data,
            pagination: PaginationMeta::new(&pagination, total_items as u64),
        })
    }

    /// Get an order with its lines
    pub async fn get_detail(&self, store_id: Uuid, order_id: Uuid) -> AppResult<PurchaseOrderDetail> {
        let sql = format!("{ORDER_SELECT} WHERE id = $1 AND store_id = $2");
        let header = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(order_id)
            .bind(store_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Purchase order".to_string()))?;

        let sql = format!("{LINE_SELECT} WHERE purchase_order_id = $1 ORDER BY line_no ASC, id ASC");
        let lines = sqlx::query_as::<_, LineRow>(&sql)
            .bind(order_id)
            .fetch_all(&self.db)
            .await?
            .into_iter()
            .map(LineRow::into_model)
            .collect();

        Ok(PurchaseOrderDetail {
            order: header.into_model()?,
            lines,
        })
    }

    /// Replace the lines and metadata of a pending order
    pub async fn update(
        &self,
        store_id: Uuid,
        order_id: Uuid,
        input: UpdateOrderInput,
    ) -> AppResult<PurchaseOrderDetail> {
        input.validate()?;
        let UpdateOrderInput {
            lines,
            priority,
            notes,
        } = input;
        let lines = submitted_lines(lines)?;

        let mut tx = self.db.begin().await?;

        let header = lock_order(&mut tx, store_id, order_id).await?;
        let status = parse_status(&header.status)?;
        if !status.is_editable() {
            return Err(AppError::InvalidState(format!(
                "Order {} cannot be edited in status {}",
                header.order_code, status
            )));
        }

        let materials = resolve_materials(&mut tx, store_id, &lines).await?;

        sqlx::query("DELETE FROM purchase_order_lines WHERE purchase_order_id = $1")
            .bind(order_id)
            .execute(&mut *tx)
            .await?;

        for (line_no, (line, material)) in lines.iter().zip(&materials).enumerate() {
            insert_line(&mut tx, order_id, line_no as i32, line, material).await?;
        }

        if let Some(priority) = priority {
            sqlx::query("UPDATE purchase_orders SET priority = $2 WHERE id = $1")
                .bind(order_id)
                .bind(priority.as_str())
                .execute(&mut *tx)
                .await?;
        }
        if let Some(notes) = &notes {
            sqlx::query("UPDATE purchase_orders SET notes = $2 WHERE id = $1")
                .bind(order_id)
                .bind(notes)
                .execute(&mut *tx)
                .await?;
        }

        recalc_header(&mut tx, order_id).await?;

        let header = fetch_order(&mut tx, order_id).await?;
        let lines = fetch_lines(&mut tx, order_id).await?;
        tx.commit().await?;

        Ok(PurchaseOrderDetail {
            order: header.into_model()?,
            lines,
        })
    }

    /// Delete a pending order and all of its lines
    pub async fn delete(&self, store_id: Uuid, order_id: Uuid) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let header = lock_order(&mut tx, store_id, order_id).await?;
        let status = parse_status(&header.status)?;
        if !status.is_editable() {
            return Err(AppError::InvalidState(format!(
                "Order {} cannot be deleted in status {}",
                header.order_code, status
            )));
        }

        sqlx::query("DELETE FROM purchase_order_lines WHERE purchase_order_id = $1")
            .bind(order_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM purchase_orders WHERE id = $1")
            .bind(order_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(order_code = %header.order_code, "Deleted purchase order");
        Ok(())
    }

    /// Delete one line from a pending order and recompute the header
    ///
    /// An order left with zero lines is kept; it simply disappears from
    /// list views until lines are added again or it is deleted.
    pub async fn delete_line(&self, store_id: Uuid, line_id: Uuid) -> AppResult<PurchaseOrderDetail> {
        let mut tx = self.db.begin().await?;

        let order_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT po.id
            FROM purchase_order_lines pol
            JOIN purchase_orders po ON po.id = pol.purchase_order_id
            WHERE pol.id = $1 AND po.store_id = $2
            FOR UPDATE OF po
            "#,
        )
        .bind(line_id)
        .bind(store_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Order line".to_string()))?;

        let header = fetch_order(&mut tx, order_id).await?;
        let status = parse_status(&header.status)?;
        if !status.is_editable() {
            return Err(AppError::InvalidState(format!(
                "Order {} cannot be edited in status {}",
                header.order_code, status
            )));
        }

        sqlx::query("DELETE FROM purchase_order_lines WHERE id = $1")
            .bind(line_id)
            .execute(&mut *tx)
            .await?;

        recalc_header(&mut tx, order_id).await?;

        let header = fetch_order(&mut tx, order_id).await?;
        let lines = fetch_lines(&mut tx, order_id).await?;
        tx.commit().await?;

        Ok(PurchaseOrderDetail {
            order: header.into_model()?,
            lines,
        })
    }

    /// Advance (or cancel) an order through its lifecycle
    ///
    /// Requesting the status the order already has is an idempotent no-op.
    /// The transition is applied with a compare-and-set on the expected
    /// status; losing the race surfaces as a retryable conflict.
    pub async fn update_status(
        &self,
        store_id: Uuid,
        order_id: Uuid,
        input: UpdateStatusInput,
    ) -> AppResult<PurchaseOrder> {
        for _ in 0..STATUS_CAS_ATTEMPTS {
            let sql = format!("{ORDER_SELECT} WHERE id = $1 AND store_id = $2");
            let header = sqlx::query_as::<_, OrderRow>(&sql)
                .bind(order_id)
                .bind(store_id)
                .fetch_optional(&self.db)
                .await?
                .ok_or_else(|| AppError::NotFound("Purchase order".to_string()))?;

            let current = parse_status(&header.status)?;
            if current == input.status {
                return header.into_model();
            }
            if !current.can_transition_to(input.status) {
                return Err(AppError::InvalidState(format!(
                    "Cannot move order {} from {} to {}",
                    header.order_code, current, input.status
                )));
            }

            let updated = sqlx::query_as::<_, OrderRow>(
                r#"
                UPDATE purchase_orders
                SET status = $3,
                    actual_delivery_date = CASE WHEN $3 = 'DELIVERED'
                                                THEN CURRENT_DATE
                                                ELSE actual_delivery_date END
                WHERE id = $1 AND store_id = $2 AND status = $4
                RETURNING id, store_id, order_code, supplier, main_item_name, item_count,
                          priority, notes, status, order_date, actual_delivery_date,
                          total_price, created_at
                "#,
            )
            .bind(order_id)
            .bind(store_id)
            .bind(input.status.as_str())
            .bind(current.as_str())
            .fetch_optional(&self.db)
            .await?;

            // Lost the compare-and-set: re-read and re-evaluate the request
            // against the now-current status.
            let Some(updated) = updated else { continue };

            tracing::info!(
                order_code = %header.order_code,
                from = current.as_str(),
                to = input.status.as_str(),
                "Order status transition"
            );

            return updated.into_model();
        }

        Err(AppError::Conflict(
            "Order status changed concurrently; retry".to_string(),
        ))
    }
}

/// Validate submitted lines and drop the zero-count ones.
///
/// A zero count mirrors an untouched cart row and is excluded rather than
/// refused; negative counts are rejected. A submission left with no
/// positive lines is an empty cart.
fn submitted_lines(lines: Vec<OrderLineInput>) -> AppResult<Vec<OrderLineInput>> {
    for line in &lines {
        validation::validate_line_count(line.count).map_err(|message| {
            AppError::InvalidQuantity {
                field: "count".to_string(),
                message: message.to_string(),
            }
        })?;
        validation::validate_unit_price(line.unit_price).map_err(|message| {
            AppError::Validation {
                field: "unit_price".to_string(),
                message: message.to_string(),
            }
        })?;
    }

    let lines: Vec<OrderLineInput> = lines.into_iter().filter(|l| l.count > 0).collect();
    if lines.is_empty() {
        return Err(AppError::EmptyCart);
    }
    Ok(lines)
}

/// Resolve every referenced material, in line order
async fn resolve_materials(
    tx: &mut Transaction<'_, Postgres>,
    store_id: Uuid,
    lines: &[OrderLineInput],
) -> AppResult<Vec<MaterialRef>> {
    let mut materials = Vec::with_capacity(lines.len());
    for line in lines {
        let material = sqlx::query_as::<_, MaterialRef>(
            "SELECT id, name, supplier, purchase_price FROM store_materials \
             WHERE id = $1 AND store_id = $2",
        )
        .bind(line.store_material_id)
        .bind(store_id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| {
            AppError::UnresolvedReference(format!(
                "Material {} is not in the store catalog",
                line.store_material_id
            ))
        })?;
        materials.push(material);
    }
    Ok(materials)
}

/// Unit price for a line: request price first, then the catalog price
fn line_unit_price(line: &OrderLineInput, material: &MaterialRef) -> Decimal {
    line.unit_price
        .or(material.purchase_price)
        .unwrap_or(Decimal::ZERO)
}

async fn insert_line(
    tx: &mut Transaction<'_, Postgres>,
    order_id: Uuid,
    line_no: i32,
    line: &OrderLineInput,
    material: &MaterialRef,
) -> AppResult<()> {
    let unit_price = line_unit_price(line, material);
    let total_price = unit_price * Decimal::from(line.count);

    sqlx::query(
        r#"
        INSERT INTO purchase_order_lines (
            id, purchase_order_id, store_material_id, material_name,
            line_no, count, unit_price, total_price
        )
        VALUES (gen_random_uuid(), $1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(order_id)
    .bind(material.id)
    .bind(&material.name)
    .bind(line_no)
    .bind(line.count)
    .bind(unit_price)
    .bind(total_price)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

/// Recompute the header aggregates from the surviving lines
async fn recalc_header(tx: &mut Transaction<'_, Postgres>, order_id: Uuid) -> AppResult<()> {
    let lines = fetch_lines(tx, order_id).await?;

    let item_count = lines.len() as i32;
    let total_price: Decimal = lines.iter().map(|l| l.total_price).sum();
    let main_item_name = lines.first().map(|l| l.material_name.clone());

    let suppliers = sqlx::query_scalar::<_, Option<String>>(
        r#"
        SELECT sm.supplier
        FROM purchase_order_lines pol
        JOIN store_materials sm ON sm.id = pol.store_material_id
        WHERE pol.purchase_order_id = $1
        ORDER BY pol.line_no ASC, pol.id ASC
        "#,
    )
    .bind(order_id)
    .fetch_all(&mut **tx)
    .await?;
    let supplier = infer_supplier_label(suppliers.iter().map(|s| s.as_deref()));

    sqlx::query(
        r#"
        UPDATE purchase_orders
        SET item_count = $2, total_price = $3, main_item_name = $4, supplier = $5
        WHERE id = $1
        "#,
    )
    .bind(order_id)
    .bind(item_count)
    .bind(total_price)
    .bind(&main_item_name)
    .bind(&supplier)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

async fn lock_order(
    tx: &mut Transaction<'_, Postgres>,
    store_id: Uuid,
    order_id: Uuid,
) -> AppResult<OrderRow> {
    let sql = format!("{ORDER_SELECT} WHERE id = $1 AND store_id = $2 FOR UPDATE");
    sqlx::query_as::<_, OrderRow>(&sql)
        .bind(order_id)
        .bind(store_id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Purchase order".to_string()))
}

async fn fetch_order(tx: &mut Transaction<'_, Postgres>, order_id: Uuid) -> AppResult<OrderRow> {
    let sql = format!("{ORDER_SELECT} WHERE id = $1");
    Ok(sqlx::query_as::<_, OrderRow>(&sql)
        .bind(order_id)
        .fetch_one(&mut **tx)
        .await?)
}

async fn fetch_lines(
    tx: &mut Transaction<'_, Postgres>,
    order_id: Uuid,
) -> AppResult<Vec<PurchaseOrderLine>> {
    let sql = format!("{LINE_SELECT} WHERE purchase_order_id = $1 ORDER BY line_no ASC, id ASC");
    let lines = sqlx::query_as::<_, LineRow>(&sql)
        .bind(order_id)
        .fetch_all(&mut **tx)
        .await?;
    Ok(lines.into_iter().map(LineRow::into_model).collect())
}

fn parse_status(raw: &str) -> AppResult<OrderStatus> {
    raw.parse::<OrderStatus>()
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))
}

/// Representative supplier label over the referenced materials
fn infer_supplier_label<'a, I>(suppliers: I) -> String
where
    I: Iterator<Item = Option<&'a str>>,
{
    let mut label: Option<&str> = None;
    let mut mixed = false;
    let mut any_missing = false;

    for supplier in suppliers {
        match supplier.filter(|s| !s.is_empty()) {
            Some(name) => match label {
                Some(existing) if existing != name => mixed = true,
                Some(_) => {}
                None => label = Some(name),
            },
            None => any_missing = true,
        }
    }

    match label {
        None => SUPPLIER_UNSPECIFIED.to_string(),
        Some(_) if mixed || any_missing => SUPPLIER_MIXED.to_string(),
        Some(name) => name.to_string(),
    }
}
