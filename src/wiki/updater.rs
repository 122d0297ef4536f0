use crate::errors::{TableError, TableResult};
use crate::wiki::table::{append_row, encode_table, parse_table, TableRow};
use crate::wiki::transport::Transport;
use crate::wiki::types::{
    Connection, ContentResponse, PageSnapshot, StorageUpdate, UpdateBody, UpdateOutcome,
    UpdatePayload, VersionUpdate,
};

/// Read the page body in storage representation.
pub async fn fetch(transport: &dyn Transport, connection: &Connection) -> TableResult<PageSnapshot> {
    let url = connection.fetch_url();
    let json = transport.get_json(&url, &connection.credentials).await?;

    let content: ContentResponse = serde_json::from_value(json)
        .map_err(|e| TableError::Validation(format!("malformed page content response: {e}")))?;
    let snapshot = PageSnapshot::from(content);

    tracing::debug!(
        page_id = %connection.page_id,
        title = %snapshot.title,
        version = snapshot.version,
        body_len = snapshot.body.len(),
        "page fetched"
    );
    Ok(snapshot)
}

pub fn build_update_payload(
    connection: &Connection,
    snapshot: &PageSnapshot,
    body: String,
) -> TableResult<UpdatePayload> {
    let number = snapshot.version.checked_add(1).ok_or_else(|| {
        TableError::Validation(format!("page version {} cannot be incremented", snapshot.version))
    })?;

    Ok(UpdatePayload {
        id: connection.page_id.clone(),
        content_type: "page".to_string(),
        title: snapshot.title.clone(),
        body: UpdateBody {
            storage: StorageUpdate {
                value: body,
                representation: "storage".to_string(),
            },
        },
        version: VersionUpdate {
            number,
            minor_edit: true,
        },
    })
}

/// Fetch the page, append `new_row` to its table and write it back as the
/// next version. The write is only issued once the fetch has succeeded.
pub async fn update(
    transport: &dyn Transport,
    connection: &Connection,
    new_row: TableRow,
) -> TableResult<UpdateOutcome> {
    update_inner(transport, connection, new_row)
        .await
        .map_err(TableError::update_failed)
}

async fn update_inner(
    transport: &dyn Transport,
    connection: &Connection,
    new_row: TableRow,
) -> TableResult<UpdateOutcome> {
    let snapshot = fetch(transport, connection).await?;

    let rows = parse_table(&snapshot.body);
    tracing::debug!(existing_rows = rows.len(), "table parsed");
    let rows = append_row(rows, new_row);
    let row_count = rows.len();

    let payload = build_update_payload(connection, &snapshot, encode_table(&rows))?;
    let version = payload.version.number;
    let body = serde_json::to_value(&payload)?;

    transport
        .put_json(&connection.content_url(), &connection.credentials, &body)
        .await?;

    tracing::info!(
        page_id = %connection.page_id,
        version = version,
        rows = row_count,
        "table updated"
    );
    Ok(UpdateOutcome { version, row_count })
}
