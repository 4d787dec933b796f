use waymark::{ResolverBuilder, UrlResolver, UrlSpec};

struct Item {
    id: u64,
}

fn main() {
    // Declare rules in priority order: first match wins
    let resolver: UrlResolver<Item> = ResolverBuilder::new()
        .rule(|r| r.action("view").compute(|item: &Item| UrlSpec::new(format!("/items/{}", item.id))))
        .rule(|r| r.one_of(["index", "list"]).to("/items"))
        .rule(|r| r.any().to("/items"))
        .default_url("/home")
        .build();

    let item = Item { id: 42 };

    for action in ["view", "index", "archive"] {
        let url = resolver.resolve(action, &item).expect("resolution failed");
        println!("{action} -> {url}");
    }

    println!("{resolver}");
}
