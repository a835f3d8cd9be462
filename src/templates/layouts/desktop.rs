use maud::{html, Markup, DOCTYPE};

pub fn desktop_layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (maud::PreEscaped(PRINT_CSS)) }
            }
            body {
                header class="no-print" {
                    h3 { "Fleet Operations" }
                    nav {
                        ul {
                            li { a href="/" { "Vehicle Change History" } }
                        }
                    }
                }
                (content)
            }
        }
    }
}

const PRINT_CSS: &str = r#"
body { font-family: system-ui, sans-serif; margin: 1.5rem; color: #111; }
header { display: flex; gap: 2rem; align-items: center; border-bottom: 1px solid #ddd; margin-bottom: 1rem; }
header ul { list-style: none; display: flex; gap: 1rem; padding: 0; }
table.report { width: 100%; border-collapse: collapse; font-size: 0.85rem; }
table.report th, table.report td { border: 1px solid #999; padding: 4px 6px; text-align: left; }
table.report th { background: #eee; }
.card { border: 1px solid #ddd; border-radius: 6px; padding: 1rem; max-width: 640px; }
.card label { display: block; margin-top: 0.75rem; }
.muted { color: #666; }
@media print { .no-print { display: none; } }
"#;
