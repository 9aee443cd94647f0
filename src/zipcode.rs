use crate::location::PostalAddress;

/// Look up city and state from a US zip code
pub fn lookup_zipcode(zip: &str) -> Option<(String, String)> {
    // Avoid zipcodes::matching to suppress debug_print output.
    let zip = zip.split('-').next()?.trim();
    let results = zipcodes::filter_by(vec![|z| z.zip_code == zip], None).ok()?;
    let info = results.first()?;
    Some((info.city.clone(), info.state.clone()))
}

/// Fill a missing locality or region of a US address from its zip code
pub fn fill_from_zipcode(address: &mut PostalAddress, country_code: Option<&str>) {
    if !country_code.is_some_and(|c| c.eq_ignore_ascii_case("us")) {
        return;
    }
    if address.locality.is_some() && address.administrative_area.is_some() {
        return;
    }
    let Some((city, state)) = address.postal_code.as_deref().and_then(lookup_zipcode) else {
        return;
    };
    address.locality.get_or_insert(city);
    address.administrative_area.get_or_insert(state);
}
