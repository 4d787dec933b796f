use waymark::{FixedIdentity, GrantTable, Identity, ResolverBuilder, UrlResolver};

fn resolver_for(id: &str) -> UrlResolver<()> {
    ResolverBuilder::new()
        .rule(|r| r.action("update").to("/items/update").requires("can_edit"))
        .rule(|r| r.action("update").to("/items/request-access"))
        .rule(|r| r.any().to("/items"))
        .identity(FixedIdentity(Identity::new(id)))
        .oracle(GrantTable::new().grant("can_edit", "alice"))
        .build()
}

fn main() {
    // Alice holds can_edit, Bob does not; the same action resolves
    // differently for each of them.
    for id in ["alice", "bob"] {
        let resolver = resolver_for(id);
        let url = resolver.resolve("update", &()).expect("resolution failed");
        println!("{id}: update -> {url}");
    }
}
