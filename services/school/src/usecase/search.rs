use campus_domain::pagination::PageRequest;
use campus_domain::role::Role;

use crate::domain::repository::{AccountRepository, ClassRepository};
use crate::domain::types::{Account, Class};
use crate::error::SchoolServiceError;

/// Longest filter accepted; longer input cannot match any indexed field.
const MAX_FILTER_LEN: usize = 255;

/// One page of search results.
#[derive(Debug)]
pub struct SearchOutput<T> {
    pub items: Vec<T>,
    pub page: PageRequest,
}

fn normalize_filter(filter: Option<String>) -> Result<String, SchoolServiceError> {
    let filter = filter.unwrap_or_default().trim().to_owned();
    if filter.chars().count() > MAX_FILTER_LEN {
        return Err(SchoolServiceError::invalid(format!(
            "filter must be at most {MAX_FILTER_LEN} characters"
        )));
    }
    Ok(filter)
}

// ── SearchAccounts ───────────────────────────────────────────────────────────

pub struct SearchAccountsUseCase<A: AccountRepository> {
    pub accounts: A,
}

impl<A: AccountRepository> SearchAccountsUseCase<A> {
    pub async fn execute(
        &self,
        role: Role,
        filter: Option<String>,
        page: PageRequest,
    ) -> Result<SearchOutput<Account>, SchoolServiceError> {
        let filter = normalize_filter(filter)?;
        let items = self.accounts.search(role, &filter, page).await?;
        Ok(SearchOutput { items, page })
    }
}

// ── SearchClasses ────────────────────────────────────────────────────────────

pub struct SearchClassesUseCase<C: ClassRepository> {
    pub classes: C,
}

impl<C: ClassRepository> SearchClassesUseCase<C> {
    pub async fn execute(
        &self,
        filter: Option<String>,
        page: PageRequest,
    ) -> Result<SearchOutput<Class>, SchoolServiceError> {
        let filter = normalize_filter(filter)?;
        let items = self.classes.search(&filter, page).await?;
        Ok(SearchOutput { items, page })
    }
}
