//! Persona/task query composition.
//!
//! Domain rules are an ordered table; the first rule whose predicate accepts the lower-cased
//! role and task renders the query. Templates embed domain keywords alongside the literal role
//! and task.

/// Role and task as given, plus their lower-cased forms for predicate tests.
#[derive(Clone, Debug)]
pub struct QueryContext<'a> {
	pub role: &'a str,
	pub task: &'a str,
	pub role_lower: String,
	pub task_lower: String,
}
impl<'a> QueryContext<'a> {
	pub fn new(role: &'a str, task: &'a str) -> Self {
		Self { role, task, role_lower: role.to_lowercase(), task_lower: task.to_lowercase() }
	}

	fn role_has(&self, terms: &[&str]) -> bool {
		terms.iter().any(|term| self.role_lower.contains(term))
	}

	fn task_has(&self, terms: &[&str]) -> bool {
		terms.iter().any(|term| self.task_lower.contains(term))
	}
}

pub struct QueryRule {
	pub name: &'static str,
	pub matches: fn(&QueryContext<'_>) -> bool,
	pub render: fn(&QueryContext<'_>) -> String,
}

pub const DOMAIN_RULES: [QueryRule; 6] = [
	QueryRule { name: "travel", matches: is_travel, render: render_travel },
	QueryRule { name: "hr_forms", matches: is_hr_forms, render: render_hr_forms },
	QueryRule { name: "food_service", matches: is_food_service, render: render_food_service },
	QueryRule { name: "academic", matches: is_academic, render: render_academic },
	QueryRule { name: "analyst", matches: is_analyst, render: render_analyst },
	QueryRule { name: "manager", matches: is_manager, render: render_manager },
];

/// Returns the first domain rule accepting `ctx`, if any.
pub fn matching_rule(ctx: &QueryContext<'_>) -> Option<&'static QueryRule> {
	DOMAIN_RULES.iter().find(|rule| (rule.matches)(ctx))
}

pub fn compose_query(role: &str, task: &str) -> String {
	let has_role = !role.trim().is_empty();
	let has_task = !task.trim().is_empty();

	match (has_role, has_task) {
		(true, true) => {
			let ctx = QueryContext::new(role, task);

			match matching_rule(&ctx) {
				Some(rule) => (rule.render)(&ctx),
				None => format!(
					"As a {role} tasked with '{task}', I need comprehensive information including specific details, practical steps, required resources, and expert advice that directly contributes to accomplishing this task."
				),
			}
		},
		(true, false) =>
			format!("Find the most important and detailed information for a professional {role}."),
		(false, true) =>
			format!("Extract all specific and actionable information relevant to '{task}'."),
		(false, false) =>
			"Identify and provide detailed summaries of the key sections of these documents."
				.to_string(),
	}
}

fn is_travel(ctx: &QueryContext<'_>) -> bool {
	ctx.role_has(&["travel", "trip"]) || ctx.task_has(&["trip", "vacation"])
}

fn render_travel(ctx: &QueryContext<'_>) -> String {
	let (role, task) = (ctx.role, ctx.task);

	if ctx.task_has(&["college", "student", "young", "friends"]) {
		format!(
			"As a {role}, I need to plan a budget-friendly trip for college friends. The specific task is to {task}. Prioritize budget accommodations like hostels or shared rooms, free or low-cost activities, group-friendly dining options, public transportation, money-saving tips, student discounts, group activities, and practical planning advice for young travelers. Focus on affordable experiences and cost-effective travel strategies."
		)
	} else {
		format!(
			"As a {role}, I need to organize a trip. The specific task is to {task}. Extract information about accommodations, activities, transportation, dining options, and practical travel advice that would be most relevant."
		)
	}
}

fn is_hr_forms(ctx: &QueryContext<'_>) -> bool {
	ctx.role_has(&["hr"]) || ctx.task_has(&["form", "onboarding"])
}

fn render_hr_forms(ctx: &QueryContext<'_>) -> String {
	let (role, task) = (ctx.role, ctx.task);

	format!(
		"As an {role}, I need to handle document processes. The specific task is to {task}. Find information about form creation, validation, digital signatures, data storage, compliance requirements, and workflow automation that would help accomplish this task efficiently."
	)
}

fn is_food_service(ctx: &QueryContext<'_>) -> bool {
	ctx.role_has(&["food"]) || ctx.task_has(&["menu", "buffet"])
}

fn render_food_service(ctx: &QueryContext<'_>) -> String {
	let (role, task) = (ctx.role, ctx.task);

	if ctx.task_has(&["vegetarian", "vegan"]) {
		format!(
			"As a {role}, I need to prepare a special menu. The specific task is to {task}. Extract information about vegetarian main courses, side dishes, appetizers, desserts, and dietary accommodations (especially gluten-free options) that would create a complete and balanced menu."
		)
	} else {
		format!(
			"As a {role}, I need to create a menu. The specific task is to {task}. Find information about main courses, side dishes, appetizers, desserts, and presentation ideas that would be most suitable."
		)
	}
}

fn is_academic(ctx: &QueryContext<'_>) -> bool {
	ctx.role_has(&["student", "teacher", "professor"]) || ctx.task_has(&["exam", "study"])
}

fn render_academic(ctx: &QueryContext<'_>) -> String {
	let (role, task) = (ctx.role, ctx.task);

	format!(
		"As a {role}, I need to accomplish the following: {task}. Extract key concepts, important mechanisms, summaries, and actionable study points. Focus on exam-relevant material, definitions, and step-by-step explanations."
	)
}

fn is_analyst(ctx: &QueryContext<'_>) -> bool {
	ctx.role_has(&["analyst", "finance", "business"]) || ctx.task_has(&["report", "trend"])
}

fn render_analyst(ctx: &QueryContext<'_>) -> String {
	let (role, task) = (ctx.role, ctx.task);

	format!(
		"As a {role}, my task is: {task}. Extract data, trends, summaries, and actionable insights. Focus on key metrics, comparisons, and strategic recommendations."
	)
}

fn is_manager(ctx: &QueryContext<'_>) -> bool {
	ctx.role_has(&["manager", "operations"]) || ctx.task_has(&["project"])
}

fn render_manager(ctx: &QueryContext<'_>) -> String {
	let (role, task) = (ctx.role, ctx.task);

	format!(
		"As a {role}, my job is: {task}. Extract actionable steps, timelines, resource requirements, and best practices. Focus on project plans, checklists, and risk mitigation."
	)
}
