use serde::Serialize;

/// Fixed list page size.
pub const PAGE_SIZE: usize = 12;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Page<T> {
	pub items: Vec<T>,
	pub page_number: usize,
	pub total_pages: usize,
}

pub fn total_pages(len: usize, page_size: usize) -> usize {
	let page_size = page_size.max(1);

	len.div_ceil(page_size).max(1)
}

/// Slice `items` for the 1-based `page_number`, clamped into `1..=total_pages`.
pub fn page<T>(items: &[T], page_number: usize, page_size: usize) -> Page<T>
where
	T: Clone,
{
	let page_size = page_size.max(1);
	let total_pages = total_pages(items.len(), page_size);
	let page_number = page_number.clamp(1, total_pages);
	let start = ((page_number - 1) * page_size).min(items.len());
	let end = (start + page_size).min(items.len());

	Page { items: items[start..end].to_vec(), page_number, total_pages }
}

/// Current page number, pinned to the criteria it was chosen under.
#[derive(Clone, Debug, Default)]
pub struct PageCursor {
	page_number: usize,
	criteria_key: Option<String>,
}
impl PageCursor {
	pub fn page_number(&self) -> usize {
		self.page_number.max(1)
	}

	pub fn go_to(&mut self, page_number: usize) {
		self.page_number = page_number.max(1);
	}

	/// Back to page 1 when the criteria changed. Viewport-only changes keep the page.
	pub fn sync(&mut self, criteria_key: &str) -> bool {
		if self.criteria_key.as_deref() == Some(criteria_key) {
			return false;
		}

		self.criteria_key = Some(criteria_key.to_string());
		self.page_number = 1;

		true
	}
}
