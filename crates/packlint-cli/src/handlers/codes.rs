//! Error catalog listing

use crate::cli::CodesArgs;
use crate::error::Result;
use crate::output::OutputWriter;
use packlint_validation::{Category, ErrorCatalog, ErrorCode};

/// Handle the codes command
pub fn handle_codes(args: CodesArgs, output: &mut OutputWriter) -> Result<()> {
    let catalog = ErrorCatalog::builtin();
    let category = args.category.map(Category::from);
    let codes = select_codes(&catalog, category);

    output.codes(&codes)
}

fn select_codes(catalog: &ErrorCatalog, category: Option<Category>) -> Vec<&ErrorCode> {
    catalog
        .iter()
        .filter(|code| category.map_or(true, |category| code.category == category))
        .collect()
}
