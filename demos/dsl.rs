use waymark::{AllowAll, BaseUrlFormatter, ResolverBuilder, UrlResolver};

const RULES: &str = r#"
# Item pages
rule "update" | "delete" requires can_edit -> /items/manage
rule "view" -> /items/view?tab=info
rule * -> /items
default /home
"#;

fn main() {
    let resolver: UrlResolver<()> = ResolverBuilder::new()
        .rules_text(RULES)
        .expect("failed to parse rules")
        .oracle(AllowAll)
        .formatter(BaseUrlFormatter::new("https://example.com").expect("bad base URL"))
        .build();

    for action in ["view", "update", "archive"] {
        let url = resolver.resolve_str(action, &()).expect("resolution failed");
        println!("{action} -> {url}");
    }
}
