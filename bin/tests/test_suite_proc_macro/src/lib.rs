use quote::{format_ident, quote};

/// Generates one `#[test]` per `.expr` fixture found under `bin/tests/cases`.
#[proc_macro]
pub fn generate_tests(_: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let root_dir = format!("{}/../cases", env!("CARGO_MANIFEST_DIR"));
    let tests = walkdir::WalkDir::new(root_dir.clone())
        .sort_by_file_name()
        .into_iter()
        .flatten()
        .filter(|entry| entry.path().extension() == Some("expr".as_ref()))
        .map(|entry| {
            let fixture_path = entry.path().to_string_lossy();
            let relative_path = entry.path().strip_prefix(&root_dir).unwrap().to_string_lossy();
            let test_ident = format_ident!(
                "fixture_{}",
                relative_path.replace(['/', '-'], "_").trim_end_matches(".expr")
            );
            quote! {
                #[test]
                fn #test_ident() {
                    expr_expect(std::fs::read_to_string(#fixture_path).unwrap().as_str());
                }
            }
        });

    quote! {
        #[ctor::ctor]
        fn init() {
            env_logger::init();
        }

        #(#tests)*
    }
    .into()
}
