//! Unit tests for site-CN authorization.

use super::{AuthorizationError, SiteAuthorizer, SiteCn, SiteCnError};
use rstest::{fixture, rstest};

#[fixture]
fn authorizer() -> SiteAuthorizer {
    SiteAuthorizer::new(SiteCn::new("heute").expect("valid site cn"))
}

#[rstest]
#[case("", SiteCnError::Empty)]
#[case("   ", SiteCnError::Empty)]
#[case("he\nute", SiteCnError::ControlCharacters("he\nute".to_owned()))]
fn site_cn_rejects_invalid_values(#[case] raw: &str, #[case] expected: SiteCnError) {
    assert_eq!(SiteCn::new(raw), Err(expected));
}

#[rstest]
fn site_cn_trims_surrounding_whitespace() {
    let cn = SiteCn::new("  heute ").expect("valid site cn");
    assert_eq!(cn.as_str(), "heute");
}

#[rstest]
fn matching_site_is_authorized(authorizer: SiteAuthorizer) {
    let authorized = authorizer.authorize(Some("heute")).expect("authorized");
    assert_eq!(authorized.site_cn().as_str(), "heute");
}

#[rstest]
#[case(None)]
#[case(Some(""))]
#[case(Some("  "))]
fn missing_site_cn_is_rejected(authorizer: SiteAuthorizer, #[case] presented: Option<&str>) {
    assert_eq!(
        authorizer.authorize(presented),
        Err(AuthorizationError::MissingSiteCn)
    );
}

#[rstest]
#[case("morgen")]
#[case("HEUTE")]
#[case("heute2")]
fn foreign_site_is_rejected(authorizer: SiteAuthorizer, #[case] presented: &str) {
    let result = authorizer.authorize(Some(presented));
    assert_eq!(
        result,
        Err(AuthorizationError::SiteCnMismatch {
            expected: "heute".to_owned(),
            presented: presented.to_owned(),
        })
    );
}
