use crate::error::CliError;
use search_index::{SearchFilter, filter::node::FieldList};

pub fn render_filter(filter: &SearchFilter, as_json: bool) -> Result<String, CliError> {
    if as_json {
        return serde_json::to_string_pretty(filter).map_err(CliError::JsonSerialize);
    }

    let fields = filter.fields();
    Ok(format!(
        "{filter}\n\nFields ({}): {}",
        fields.len(),
        FieldList(&fields)
    ))
}

pub async fn write_filter(filter: &SearchFilter, as_json: bool, path: String) -> Result<(), CliError> {
    let rendered = render_filter(filter, as_json)?;
    tokio::fs::write(path, rendered).await?;
    Ok(())
}

pub fn print_filter(filter: &SearchFilter, as_json: bool) -> Result<(), CliError> {
    let rendered = render_filter(filter, as_json)?;
    println!("{rendered}");
    Ok(())
}
