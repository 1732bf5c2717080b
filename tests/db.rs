use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::sql_types::Integer;

mod common;

#[derive(QueryableByName)]
struct Pragma {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

#[test]
fn test_pool_hands_out_migrated_connections() {
    let test_db = common::TestDb::new("test_pool_hands_out_migrated_connections.db");
    let mut conn = test_db.pool().get().expect("connection");

    conn.batch_execute("SELECT id, hub_id, status FROM vehicles LIMIT 1;")
        .expect("vehicles table exists");
}

#[test]
fn test_connections_enforce_foreign_keys() {
    let test_db = common::TestDb::new("test_connections_enforce_foreign_keys.db");
    let mut conn = test_db.pool().get().expect("connection");

    let pragma = diesel::sql_query("PRAGMA foreign_keys")
        .get_result::<Pragma>(&mut conn)
        .expect("read pragma");
    assert_eq!(pragma.foreign_keys, 1);
}
