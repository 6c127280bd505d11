//! In-memory portal for exercising the engine without a browser.
//!
//! Screens are trees keyed by the exact selectors the engine queries. Clicking
//! a node with a `goto` target switches the current screen, and element
//! handles re-resolve their selector path on every call, the way Playwright
//! locators do.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::error::{Result, ScrapeError};
use crate::layout::selectors;
use crate::page::{Element, Page};
use crate::record::ScheduleEntry;

#[derive(Debug, Clone, Default)]
pub(crate) struct FakeNode {
	text: String,
	children: Vec<(String, Vec<FakeNode>)>,
	goto: Option<String>,
}

impl FakeNode {
	pub(crate) fn new() -> Self {
		Self::default()
	}

	pub(crate) fn text(text: impl Into<String>) -> Self {
		Self {
			text: text.into(),
			..Self::default()
		}
	}

	pub(crate) fn with(mut self, selector: &str, nodes: Vec<FakeNode>) -> Self {
		self.children.push((selector.to_string(), nodes));
		self
	}

	pub(crate) fn goto(mut self, screen: impl Into<String>) -> Self {
		self.goto = Some(screen.into());
		self
	}

	fn matches(&self, selector: &str) -> &[FakeNode] {
		self.children
			.iter()
			.find(|(sel, _)| sel == selector)
			.map(|(_, nodes)| nodes.as_slice())
			.unwrap_or(&[])
	}
}

/// Side effects observed by the fake session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Action {
	Navigate(String),
	Click { selector: String, text: String },
	Fill { selector: String, value: String },
}

#[derive(Debug)]
struct Site {
	screens: HashMap<String, FakeNode>,
	start: String,
	current: String,
	actions: Vec<Action>,
	reads: Vec<String>,
}

impl Site {
	fn resolve(&self, path: &[(String, usize)]) -> Result<&FakeNode> {
		let mut node = self
			.screens
			.get(&self.current)
			.ok_or_else(|| ScrapeError::navigation("resolving element", format!("no screen named {}", self.current)))?;
		for (selector, index) in path {
			node = node.matches(selector).get(*index).ok_or_else(|| ScrapeError::not_found(selector))?;
		}
		Ok(node)
	}
}

#[derive(Debug, Clone)]
pub(crate) struct FakePage {
	site: Arc<Mutex<Site>>,
}

#[derive(Debug, Clone)]
pub(crate) struct FakeElement {
	site: Arc<Mutex<Site>>,
	path: Vec<(String, usize)>,
}

fn lock(site: &Arc<Mutex<Site>>) -> MutexGuard<'_, Site> {
	site.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl FakePage {
	pub(crate) fn new(screens: HashMap<String, FakeNode>, start: &str) -> Self {
		Self {
			site: Arc::new(Mutex::new(Site {
				screens,
				start: start.to_string(),
				current: start.to_string(),
				actions: Vec::new(),
				reads: Vec::new(),
			})),
		}
	}

	pub(crate) fn show(&self, screen: &str) {
		lock(&self.site).current = screen.to_string();
	}

	pub(crate) fn current_screen(&self) -> String {
		lock(&self.site).current.clone()
	}

	pub(crate) fn actions(&self) -> Vec<Action> {
		lock(&self.site).actions.clone()
	}

	/// Texts of the pagination labels clicked so far.
	pub(crate) fn page_clicks(&self) -> Vec<String> {
		self.actions()
			.into_iter()
			.filter_map(|action| match action {
				Action::Click { selector, text } if selector == selectors::PAGE_LABEL => Some(text),
				_ => None,
			})
			.collect()
	}

	pub(crate) fn reads(&self) -> Vec<String> {
		lock(&self.site).reads.clone()
	}

	pub(crate) fn clear_reads(&self) {
		lock(&self.site).reads.clear();
	}

	fn element(&self, path: Vec<(String, usize)>) -> FakeElement {
		FakeElement {
			site: Arc::clone(&self.site),
			path,
		}
	}
}

#[async_trait]
impl Page for FakePage {
	type Element = FakeElement;

	async fn navigate(&self, url: &str) -> Result<()> {
		let mut site = lock(&self.site);
		site.actions.push(Action::Navigate(url.to_string()));
		site.current = site.start.clone();
		Ok(())
	}

	async fn locate(&self, selector: &str) -> Result<FakeElement> {
		let path = vec![(selector.to_string(), 0)];
		lock(&self.site).resolve(&path)?;
		Ok(self.element(path))
	}

	async fn locate_all(&self, selector: &str) -> Result<Vec<FakeElement>> {
		let count = lock(&self.site).resolve(&[])?.matches(selector).len();
		Ok((0..count).map(|i| self.element(vec![(selector.to_string(), i)])).collect())
	}

	async fn is_present(&self, selector: &str) -> Result<bool> {
		Ok(!lock(&self.site).resolve(&[])?.matches(selector).is_empty())
	}
}

#[async_trait]
impl Element for FakeElement {
	async fn text(&self) -> Result<String> {
		let mut site = lock(&self.site);
		let text = site.resolve(&self.path)?.text.clone();
		site.reads.push(text.clone());
		Ok(text)
	}

	async fn click(&self) -> Result<()> {
		let mut site = lock(&self.site);
		let node = site.resolve(&self.path)?;
		let text = node.text.clone();
		let goto = node.goto.clone();
		let selector = self.path.last().map(|(sel, _)| sel.clone()).unwrap_or_default();
		site.actions.push(Action::Click { selector, text });
		if let Some(screen) = goto {
			site.current = screen;
		}
		Ok(())
	}

	async fn fill(&self, value: &str) -> Result<()> {
		let mut site = lock(&self.site);
		site.resolve(&self.path)?;
		let selector = self.path.last().map(|(sel, _)| sel.clone()).unwrap_or_default();
		site.actions.push(Action::Fill {
			selector,
			value: value.to_string(),
		});
		Ok(())
	}

	async fn find_all(&self, selector: &str) -> Result<Vec<FakeElement>> {
		let count = lock(&self.site).resolve(&self.path)?.matches(selector).len();
		Ok((0..count)
			.map(|i| {
				let mut path = self.path.clone();
				path.push((selector.to_string(), i));
				FakeElement {
					site: Arc::clone(&self.site),
					path,
				}
			})
			.collect())
	}
}

/// One notice as the fake portal renders it.
#[derive(Debug, Clone)]
pub(crate) struct NoticeFixture {
	pub entity_name: String,
	pub published: String,
	pub nomenclature: String,
	pub category: String,
	pub description: String,
	pub reference_value: String,
	pub website: String,
	pub phone: String,
	pub convocation: ScheduleEntry,
	pub registration: ScheduleEntry,
	pub ruc: String,
	/// Render the entity information table at all.
	pub contact_table: bool,
	/// How many schedule rows to render (the fixture has three).
	pub schedule_rows: usize,
}

impl NoticeFixture {
	pub(crate) fn numbered(n: usize) -> Self {
		Self {
			entity_name: format!("MUNICIPALIDAD DISTRITAL {n}"),
			published: format!("02/01/2024 10:{:02}", n % 60),
			nomenclature: format!("AS-SM-{n}-2024-MD-1"),
			category: "Servicio".into(),
			description: format!("Servicio de mantenimiento, lote {n}"),
			reference_value: format!("{n},000.00"),
			website: format!("www.muni{n}.gob.pe"),
			phone: format!("01-555-{n:04}"),
			convocation: ScheduleEntry::new("Convocatoria", "02/01/2024", "02/01/2024"),
			registration: ScheduleEntry::new("Registro de participantes(Electronica)", "10/01/2024", "15/01/2024"),
			ruc: format!("20{n:09}"),
			contact_table: true,
			schedule_rows: 3,
		}
	}
}

/// Builder for a multi-page fake portal.
pub(crate) struct Portal {
	pages: Vec<Vec<NoticeFixture>>,
	status: Option<String>,
	missing_labels: Vec<u32>,
}

pub(crate) const SEARCH_SCREEN: &str = "search";

pub(crate) fn list_screen(page: usize) -> String {
	format!("list-{page}")
}

fn detail_screen(page: usize, row: usize) -> String {
	format!("detail-{page}-{row}")
}

impl Portal {
	pub(crate) fn new(pages: Vec<Vec<NoticeFixture>>) -> Self {
		Self {
			pages,
			status: None,
			missing_labels: Vec::new(),
		}
	}

	pub(crate) fn single_page(notices: Vec<NoticeFixture>) -> Self {
		Self::new(vec![notices])
	}

	/// `counts[i]` numbered notices on page `i + 1`, numbered across pages.
	pub(crate) fn with_counts(counts: &[usize]) -> Self {
		let mut next = 1;
		let pages = counts
			.iter()
			.map(|&count| {
				let page: Vec<NoticeFixture> = (next..next + count).map(NoticeFixture::numbered).collect();
				next += count;
				page
			})
			.collect();
		Self::new(pages)
	}

	/// Replaces the first-page status label text.
	pub(crate) fn status(mut self, text: impl Into<String>) -> Self {
		self.status = Some(text.into());
		self
	}

	/// Leaves the label for `page` out of the paginator.
	pub(crate) fn without_label(mut self, page: u32) -> Self {
		self.missing_labels.push(page);
		self
	}

	pub(crate) fn into_page(self) -> FakePage {
		let screens = self.screens();
		FakePage::new(screens, SEARCH_SCREEN)
	}

	pub(crate) fn into_page_on_results(self) -> FakePage {
		let page = self.into_page();
		page.show(&list_screen(1));
		page
	}

	fn screens(&self) -> HashMap<String, FakeNode> {
		let mut screens = HashMap::new();
		screens.insert(SEARCH_SCREEN.to_string(), search_screen());

		let total = self.pages.len().max(1);
		let total_rows: usize = self.pages.iter().map(Vec::len).sum();

		for (p, notices) in self.pages.iter().enumerate() {
			let number = p + 1;
			screens.insert(list_screen(number), self.list(number, total, total_rows, notices));
			for (i, notice) in notices.iter().enumerate() {
				screens.insert(detail_screen(number, i), detail(number, notice));
			}
		}
		screens
	}

	fn list(&self, number: usize, total: usize, total_rows: usize, notices: &[NoticeFixture]) -> FakeNode {
		let first = (number - 1) * 15 + 1;
		let status = match (&self.status, number) {
			(Some(text), 1) => text.clone(),
			_ => format!("[ Mostrando de {first} a {} de {total_rows}:{number}/{total}]", first + 14),
		};

		let rows = notices.iter().enumerate().map(|(i, notice)| result_row(number, i, notice)).collect();

		let labels = (1..=total)
			.filter(|n| !self.missing_labels.contains(&(*n as u32)))
			.map(|n| FakeNode::text(n.to_string()).goto(list_screen(n)))
			.collect();

		FakeNode::new()
			.with(selectors::PAGINATION_STATUS, vec![FakeNode::text("Resultados de la búsqueda"), FakeNode::text(status)])
			.with(selectors::RESULTS_TABLE, vec![FakeNode::new().with(selectors::ROW, rows)])
			.with(
				selectors::PAGINATOR_BOTTOM,
				vec![
					FakeNode::new()
						.with(selectors::PAGE_LABEL, labels)
						.with(selectors::ACTIVE_PAGE_LABEL, vec![FakeNode::text(number.to_string())]),
				],
			)
	}
}

fn search_screen() -> FakeNode {
	FakeNode::new()
		.with(selectors::ADVANCED_SEARCH_LEGEND, vec![FakeNode::text("Búsqueda avanzada")])
		.with(selectors::START_DATE_INPUT, vec![FakeNode::new()])
		.with(selectors::END_DATE_INPUT, vec![FakeNode::new()])
		.with(selectors::SEARCH_BUTTON, vec![FakeNode::text("Buscar").goto(list_screen(1))])
}

fn result_row(page: usize, row: usize, notice: &NoticeFixture) -> FakeNode {
	let actions = FakeNode::new().with(
		selectors::LINK,
		vec![FakeNode::text("Historial"), FakeNode::text("Ficha").goto(detail_screen(page, row))],
	);

	let cells = vec![
		FakeNode::text((row + 1).to_string()),
		FakeNode::text(notice.entity_name.clone()),
		FakeNode::text(notice.published.clone()),
		FakeNode::text(notice.nomenclature.clone()),
		FakeNode::text(""),
		FakeNode::text(notice.category.clone()),
		FakeNode::text(notice.description.clone()),
		FakeNode::text("Soles"),
		FakeNode::text(""),
		FakeNode::text(notice.reference_value.clone()),
		FakeNode::text("1"),
		FakeNode::text(""),
		actions,
	];

	FakeNode::new().with(selectors::CELL, cells)
}

fn two_cells(label: &str, value: &str) -> FakeNode {
	FakeNode::new().with(selectors::CELL, vec![FakeNode::text(label), FakeNode::text(value)])
}

fn stage_row(entry: &ScheduleEntry) -> FakeNode {
	FakeNode::new().with(
		selectors::CELL,
		vec![
			FakeNode::text(entry.label.clone()),
			FakeNode::text(entry.start.clone()),
			FakeNode::text(entry.end.clone()),
		],
	)
}

fn detail(page: usize, notice: &NoticeFixture) -> FakeNode {
	let mut node = FakeNode::new().with(selectors::BACK_BUTTON, vec![FakeNode::text("Regresar").goto(list_screen(page))]);

	if notice.contact_table {
		let info = FakeNode::new().with(
			selectors::ROW,
			vec![
				two_cells("Entidad", &notice.entity_name),
				two_cells("Dirección", "Av. Principal 123"),
				two_cells("Página Web", &notice.website),
				two_cells("Teléfono", &notice.phone),
			],
		);
		node = node.with(selectors::GENERAL_TABLE, vec![FakeNode::new().with(selectors::ENTITY_INFO_TABLE, vec![info])]);
	}

	let extra = ScheduleEntry::new("Formulación de consultas y observaciones", "16/01/2024", "18/01/2024");
	let schedule: Vec<FakeNode> = [&notice.convocation, &notice.registration, &extra]
		.into_iter()
		.take(notice.schedule_rows)
		.map(stage_row)
		.collect();
	node = node.with(
		selectors::SCHEDULE_PANEL,
		vec![FakeNode::new().with(selectors::SCHEDULE_TABLE, vec![FakeNode::new().with(selectors::ROW, schedule)])],
	);

	let grid = if notice.ruc.is_empty() {
		Vec::new()
	} else {
		vec![FakeNode::text(notice.ruc.clone()), FakeNode::text(notice.entity_name.clone())]
	};
	node.with(selectors::CONTRACTING_ENTITY_TABLE, vec![FakeNode::new().with(selectors::GRID_CELL, grid)])
}
