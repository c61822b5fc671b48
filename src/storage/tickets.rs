//! Ticket queries.

use rusqlite::{params, Connection};
use serde_json::{Map, Value};

use super::row::{column_names, json_to_sql, row_to_json};
use super::StoreError;
use crate::ticket::TicketStatus;

/// Fields of a ticket creation request after presence validation.
///
/// Values are stored with the JSON type they arrived with.
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub student_id: Value,
    pub service: Value,
    pub priority: Value,
    pub assigned_department: Value,
}

/// Insert a ticket with the initial status, returning its id.
pub fn insert_ticket(conn: &Connection, ticket: &NewTicket) -> Result<i64, StoreError> {
    conn.execute(
        "INSERT INTO tickets (student_id, service, priority, assigned_department, status) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            json_to_sql(&ticket.student_id),
            json_to_sql(&ticket.service),
            json_to_sql(&ticket.priority),
            json_to_sql(&ticket.assigned_department),
            TicketStatus::INITIAL.as_str(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Every ticket row in natural table order, keyed by column name.
pub fn list_tickets(conn: &Connection) -> Result<Vec<Map<String, Value>>, StoreError> {
    let mut stmt = conn.prepare("SELECT * FROM tickets")?;
    let columns = column_names(&stmt);
    let tickets = stmt
        .query_map([], |row| row_to_json(row, &columns))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(tickets)
}

/// Set the status of a ticket, returning the number of rows matched.
///
/// An unknown id matches nothing and is not an error.
pub fn update_status(conn: &Connection, ticket_id: i64, status: TicketStatus) -> Result<usize, StoreError> {
    let changed = conn.execute(
        "UPDATE tickets SET status = ?1 WHERE id = ?2",
        params![status.as_str(), ticket_id],
    )?;
    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::schema::initialize_schema;
    use serde_json::json;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();
        conn
    }

    fn sample() -> NewTicket {
        NewTicket {
            student_id: json!("alice"),
            service: json!("ID card"),
            priority: json!("low"),
            assigned_department: json!("registrar"),
        }
    }

    #[test]
    fn test_insert_sets_pending() {
        let conn = setup();
        let id = insert_ticket(&conn, &sample()).unwrap();
        assert_eq!(id, 1);

        let tickets = list_tickets(&conn).unwrap();
        assert_eq!(tickets.len(), 1);
        assert_eq!(
            Value::Object(tickets[0].clone()),
            json!({
                "id": 1,
                "student_id": "alice",
                "service": "ID card",
                "priority": "low",
                "assigned_department": "registrar",
                "status": "Pending"
            })
        );
    }

    #[test]
    fn test_numeric_fields_keep_their_type() {
        let conn = setup();
        let mut ticket = sample();
        ticket.student_id = json!(1024);
        insert_ticket(&conn, &ticket).unwrap();

        let tickets = list_tickets(&conn).unwrap();
        assert_eq!(tickets[0]["student_id"], json!(1024));
    }

    #[test]
    fn test_update_status_any_direction() {
        let conn = setup();
        let id = insert_ticket(&conn, &sample()).unwrap();

        assert_eq!(update_status(&conn, id, TicketStatus::Completed).unwrap(), 1);
        assert_eq!(update_status(&conn, id, TicketStatus::Pending).unwrap(), 1);
        assert_eq!(update_status(&conn, id, TicketStatus::InProgress).unwrap(), 1);

        let tickets = list_tickets(&conn).unwrap();
        assert_eq!(tickets[0]["status"], json!("In Progress"));
    }

    #[test]
    fn test_update_unknown_id_matches_nothing() {
        let conn = setup();
        assert_eq!(update_status(&conn, 99, TicketStatus::Completed).unwrap(), 0);
        assert!(list_tickets(&conn).unwrap().is_empty());
    }
}
