//! Compiled-in page templates.
//!
//! The templates are embedded with `include_str!` so the binary carries
//! them and rendering never depends on the working directory.

use tera::Tera;

/// Compiles the embedded templates into a `Tera` instance.
///
/// # Errors
///
/// Returns a `tera::Error` if any template has a syntax error.
pub fn build() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        ("base.html", include_str!("../templates/base.html")),
        (
            "produits_list.html",
            include_str!("../templates/produits_list.html"),
        ),
        (
            "commande_create.html",
            include_str!("../templates/commande_create.html"),
        ),
        ("dashboard.html", include_str!("../templates/dashboard.html")),
        (
            "produit_form.html",
            include_str!("../templates/produit_form.html"),
        ),
        (
            "client_form.html",
            include_str!("../templates/client_form.html"),
        ),
        (
            "stock_update.html",
            include_str!("../templates/stock_update.html"),
        ),
    ])?;
    Ok(tera)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;

    #[test]
    fn all_templates_compile() {
        let tera = build().unwrap();
        let mut names: Vec<&str> = tera.get_template_names().collect();
        names.sort_unstable();
        assert!(names.contains(&"base.html"));
        assert!(names.contains(&"dashboard.html"));
        assert_eq!(names.len(), 7);
    }
}
