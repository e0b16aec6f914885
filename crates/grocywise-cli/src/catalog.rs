//! Read-only listings of the location directory and filter catalogs.

use grocywise_core::{FilterCategory, LocationDirectory};

/// Print every country with its cities, or the cities of one country.
///
/// # Errors
///
/// Returns an error if `country` is not in the directory.
pub(crate) fn print_locations(
    directory: &LocationDirectory,
    country: Option<&str>,
) -> anyhow::Result<()> {
    if let Some(country) = country {
        let cities = directory
            .cities(country)
            .ok_or_else(|| anyhow::anyhow!("country '{country}' not found; run `locations` to list them"))?;
        for city in cities {
            println!("{city}");
        }
        return Ok(());
    }

    println!("{:<18}CITIES", "COUNTRY");
    for group in directory.groups() {
        println!("{:<18}{}", group.country, group.cities.join(", "));
    }
    Ok(())
}

pub(crate) fn print_filters() {
    for (heading, category) in [
        ("Food groups", FilterCategory::FoodGroup),
        ("Dietary restrictions", FilterCategory::Dietary),
        ("Cuisines", FilterCategory::Cuisine),
    ] {
        println!("{heading}:");
        for label in category.catalog() {
            println!("  {label}");
        }
    }
}
