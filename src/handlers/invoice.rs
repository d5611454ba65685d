// src/handlers/invoice.rs
use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::json;

use crate::activity::log_activity;
use crate::dtos::invoice::{
    InvoiceList, LineItemRequest, PurchaseInvoiceRequest, SaleInvoiceRequest,
};
use crate::dtos::response::{ok, DataResponse};
use crate::error::AppError;
use crate::models::activity::ActivityKind;
use crate::models::invoice::{Invoice, InvoiceLineItem, InvoiceType};
use crate::models::medicine::Medicine;
use crate::state::AppState;
use crate::store::{timestamped_key, KvTransaction};

fn validated_items(items: Vec<LineItemRequest>) -> Result<Vec<InvoiceLineItem>, AppError> {
    if items.is_empty() {
        return Err(AppError::validation("عناصر الفاتورة مطلوبة"));
    }
    if items.iter().any(|item| item.quantity <= 0) {
        return Err(AppError::validation("كمية العنصر يجب أن تكون أكبر من صفر"));
    }
    Ok(items.into_iter().map(InvoiceLineItem::from).collect())
}

async fn fetch_medicine(
    tx: &mut dyn KvTransaction,
    key: &str,
) -> Result<Option<Medicine>, AppError> {
    match tx.get(key).await? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

// POST /purchase-invoice - Post a purchase and restock its lines
pub async fn create_purchase_invoice(
    State(state): State<AppState>,
    Json(payload): Json<PurchaseInvoiceRequest>,
) -> Result<Json<DataResponse<Invoice>>, AppError> {
    let items = validated_items(payload.items)?;
    let supplier_name = payload.supplier_name.unwrap_or_default();

    let invoice = Invoice {
        id: timestamped_key(InvoiceType::Purchase.key_prefix()),
        invoice_type: InvoiceType::Purchase,
        items,
        total: payload.total,
        supplier_name: Some(supplier_name.clone()),
        customer_name: None,
        created_at: Utc::now(),
    };

    // The invoice record and every stock adjustment land in one commit.
    let mut tx = state.store.begin().await?;
    tx.set(&invoice.id, serde_json::to_value(&invoice)?).await?;

    for item in &invoice.items {
        // A line naming an unknown medicine skips its adjustment; the
        // invoice still posts.
        let Some(mut medicine) = fetch_medicine(tx.as_mut(), &item.medicine_id).await? else {
            continue;
        };
        medicine.set_quantity(medicine.quantity + item.quantity);
        tx.set(&medicine.id, serde_json::to_value(&medicine)?)
            .await?;
    }

    tx.commit().await?;

    log_activity(
        state.store.as_ref(),
        ActivityKind::PurchaseInvoice,
        format!("تم إنشاء فاتورة شراء من {}", supplier_name),
        json!({
            "invoiceId": invoice.id,
            "supplierName": supplier_name,
            "total": invoice.total,
            "itemsCount": invoice.items.len(),
        }),
    )
    .await;

    Ok(ok(invoice))
}

// POST /sale-invoice - Post a sale; all lines must be in stock
pub async fn create_sale_invoice(
    State(state): State<AppState>,
    Json(payload): Json<SaleInvoiceRequest>,
) -> Result<Json<DataResponse<Invoice>>, AppError> {
    let items = validated_items(payload.items)?;
    let customer_name = payload.customer_name.unwrap_or_default();

    let invoice = Invoice {
        id: timestamped_key(InvoiceType::Sale.key_prefix()),
        invoice_type: InvoiceType::Sale,
        items,
        total: payload.total,
        supplier_name: None,
        customer_name: Some(customer_name.clone()),
        created_at: Utc::now(),
    };

    let mut tx = state.store.begin().await?;
    tx.set(&invoice.id, serde_json::to_value(&invoice)?).await?;

    // Availability is checked on the same read the decrement uses, and lines
    // repeating a medicine are checked against the running remainder.
    // Bailing out drops the transaction, taking the invoice record and any
    // earlier decrements with it.
    for item in &invoice.items {
        let medicine = fetch_medicine(tx.as_mut(), &item.medicine_id).await?;
        let Some(mut medicine) = medicine.filter(|m| m.quantity >= item.quantity) else {
            return Err(AppError::insufficient_stock(format!(
                "كمية غير كافية للدواء: {}",
                item.medicine_name
            )));
        };
        medicine.set_quantity(medicine.quantity - item.quantity);
        tx.set(&medicine.id, serde_json::to_value(&medicine)?)
            .await?;
    }

    tx.commit().await?;

    log_activity(
        state.store.as_ref(),
        ActivityKind::SaleInvoice,
        format!("تم إنشاء فاتورة بيع للعميل {}", customer_name),
        json!({
            "invoiceId": invoice.id,
            "customerName": customer_name,
            "total": invoice.total,
            "itemsCount": invoice.items.len(),
        }),
    )
    .await;

    Ok(ok(invoice))
}

// GET /invoices - Purchases and sales, separate and combined
pub async fn get_invoices(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<InvoiceList>>, AppError> {
    let purchases = decode_invoices(
        state
            .store
            .get_by_prefix(InvoiceType::Purchase.key_prefix())
            .await?,
    )?;
    let sales = decode_invoices(
        state
            .store
            .get_by_prefix(InvoiceType::Sale.key_prefix())
            .await?,
    )?;

    let mut all: Vec<Invoice> = purchases.iter().chain(sales.iter()).cloned().collect();
    all.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    Ok(ok(InvoiceList {
        purchases,
        sales,
        all,
    }))
}

fn decode_invoices(values: Vec<serde_json::Value>) -> Result<Vec<Invoice>, AppError> {
    values
        .into_iter()
        .map(serde_json::from_value)
        .collect::<Result<_, _>>()
        .map_err(Into::into)
}
