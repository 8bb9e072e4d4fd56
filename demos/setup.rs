use testdb_config::{setup, DriverSet, PlatformDefaults, PropertyStore};

fn main() -> Result<(), testdb_config::Error> {
    // defaults -> optional local file -> TESTDB__* environment overrides
    let mut store = PropertyStore::builder()
        .with_properties([
            ("ebean.test.ddlMode", "create"),
            ("ebean.test.postgres.extensions", "hstore, pgcrypto"),
        ])
        .with_file("demos/test-db.toml", false)
        .with_env("TESTDB", "__")
        .build()?;

    let drivers = DriverSet::new(["org.postgresql.Driver"]);
    let resolved = setup(
        "orders",
        "orders",
        &PlatformDefaults::postgres(),
        &mut store,
        &drivers,
    )?;

    println!(
        "ddl mode: {} (migrations disabled={})",
        resolved.ddl_mode,
        resolved.migration_disabled()
    );
    println!("url: {}", resolved.data_source.url);
    for (key, value) in resolved.container.iter() {
        println!("container {key} = {value}");
    }
    for (key, value) in store.iter().filter(|(k, _)| k.starts_with("datasource.")) {
        println!("{key} = {value}");
    }

    Ok(())
}
