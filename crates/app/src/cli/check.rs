use std::io;

use voucher_app::context::AppContext;

use crate::cli::write_failed;

pub(crate) async fn run(context: &AppContext, mut out: impl io::Write) -> Result<(), String> {
    let codes = context
        .discount_codes
        .list_codes(context.tenant)
        .await
        .map_err(|error| format!("failed to list discount codes: {error}"))?;

    let active = codes.iter().filter(|record| record.code.is_active()).count();

    writeln!(
        out,
        "loaded {} discount codes ({active} active) for tenant {}",
        codes.len(),
        context.tenant
    )
    .map_err(write_failed)
}
