use chrono::NaiveTime;
use timecol::{Column, ColumnConfig, TimeColumn, TimeColumnBuilder};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Load raw cells as they come out of a CSV file
    let mut arrivals = TimeColumn::create("arrival");
    for cell in ["900", "", "1430", "-1", "0815", "NA", "1430"] {
        arrivals.add_cell(cell)?;
    }
    arrivals.compact();

    println!("{} rows, {} distinct", arrivals.size(), arrivals.count_unique());
    for row in 0..arrivals.size() {
        println!("  row {}: {:?}", row, arrivals.get_string(row)?);
    }

    // Equality query
    let half_two = NaiveTime::from_hms_opt(14, 30, 0).unwrap();
    let rows = arrivals.is_equal_to(half_two);
    println!("rows at 14:30: {:?}", rows.iter().collect::<Vec<_>>());

    // Value sort vs row order
    let sorted = arrivals.sort_ascending();
    let rendered = (0..sorted.size())
        .map(|r| sorted.get_string(r))
        .collect::<Result<Vec<_>, _>>()?;
    println!("sorted values: {:?}", rendered);
    println!("row order: {:?}", arrivals.sorted_rows(false));

    // Custom configuration
    let config = ColumnConfig::default()
        .with_missing_indicators(["?", "n/a"])
        .with_missing_case_sensitive(false)
        .with_missing_display("--");
    let departures = TimeColumnBuilder::new("departure")
        .config(config)
        .build_from_cells(["0700", "N/A", "2:45 PM"])?;
    println!("departures: {:?}", departures.get_string(1)?);

    match TimeColumn::create("bad").add_cell("noon") {
        Ok(()) => println!("unexpected success"),
        Err(e) => println!("rejected: {}", e),
    }

    Ok(())
}
