use supadmin::*;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let config = ConnectionConfig::new(
        std::env::var("SUPADMIN_URL")?,
        std::env::var("SUPADMIN_PUBLIC_KEY")?,
        std::env::var("SUPADMIN_PRIVILEGED_KEY")?,
    );

    let client = RestClient::new(config)?;
    let status = client.check_connection().await;
    println!("connected: {} {:?}", status.connected, status.error);

    let mut console = AdminConsole::new(Box::new(client));
    console.refresh_tables().await?;
    println!("tables: {:?}", console.tables);

    console.set_tab(Tab::Create);
    console.create.table_name = "widgets".into();
    console.create.add_column();
    if let Some(col) = console.create.column_mut(1) {
        col.name = "label".into();
    }
    console.create_table().await?;
    println!("created widgets, tables now: {:?}", console.tables);

    console.select_table("widgets");
    for col in fetch_columns(console.backend(), "widgets").await? {
        println!(
            "{} {} nullable={} default={:?}",
            col.column_name,
            col.data_type,
            col.nullable(),
            col.column_default
        );
    }
    for row in fetch_preview(console.backend(), "widgets", DEFAULT_ROW_LIMIT).await? {
        println!("{row}");
    }

    let result = console.run_sql("SELECT count(*) FROM \"widgets\";").await?;
    println!("count result: {result}");

    console.delete_table("widgets").await?;
    println!("dropped widgets, tables now: {:?}", console.tables);

    Ok(())
}
