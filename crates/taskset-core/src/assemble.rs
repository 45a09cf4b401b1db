//! Document assembly: a title page plus one page per task.
//!
//! Every question is rendered before the backend is touched, so a failing
//! expression never leaves a half-built document behind.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::DocumentError;
use crate::model::{Assignment, DocumentOptions, RenderedTask, Task};
use crate::render::render;
use crate::traits::{LayoutBackend, TextOptions};

/// Points-to-pixels factor used for the blank line above the questions.
const PT_TO_PX: f64 = 72.0 / 96.0;

/// One fully assembled document copy.
#[derive(Debug, Clone)]
pub struct AssembledCopy<B> {
    /// The laid-out document.
    pub document: B,
    /// `page_order[i]` is the index of the task shown on content page `i`
    /// (the page right after the title page is content page 0).
    pub page_order: Vec<usize>,
    /// Rendered tasks in authoring order.
    pub tasks: Vec<RenderedTask>,
}

/// Render every task of `assignment` to literal text.
pub fn render_tasks<R>(assignment: &Assignment, rng: &mut R) -> Result<Vec<RenderedTask>, DocumentError>
where
    R: Rng + ?Sized,
{
    assignment
        .tasks
        .iter()
        .enumerate()
        .map(|(task_index, task)| render_task(task_index, task, rng))
        .collect()
}

fn render_task<R>(task_index: usize, task: &Task, rng: &mut R) -> Result<RenderedTask, DocumentError>
where
    R: Rng + ?Sized,
{
    let questions = task
        .questions
        .iter()
        .enumerate()
        .map(|(question_index, question)| {
            render(question, rng).map_err(|source| DocumentError::Question {
                task: task_index,
                question: question_index,
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RenderedTask {
        title: task.title.clone(),
        body: task.body.clone(),
        questions,
    })
}

/// Assemble one copy of `assignment` into `backend`.
///
/// With `options.shuffle` the task pages are permuted uniformly at random;
/// the title page stays first.
pub fn assemble<B, R>(
    assignment: &Assignment,
    options: &DocumentOptions,
    mut backend: B,
    rng: &mut R,
) -> Result<AssembledCopy<B>, DocumentError>
where
    B: LayoutBackend,
    R: Rng + ?Sized,
{
    let tasks = render_tasks(assignment, rng)?;

    let title_page = backend.page_count();
    add_title_page(&mut backend, options, &assignment.title);
    for task in &tasks {
        add_task_page(&mut backend, options, task);
    }

    let mut page_order: Vec<usize> = (0..tasks.len()).collect();
    if options.shuffle {
        page_order.shuffle(rng);
        reorder_pages(&mut backend, title_page + 1, &page_order);
    }

    tracing::debug!(
        title = %assignment.title,
        pages = backend.page_count(),
        ?page_order,
        "assembled document"
    );

    Ok(AssembledCopy {
        document: backend,
        page_order,
        tasks,
    })
}

fn line_width<B: LayoutBackend>(backend: &B, options: &DocumentOptions) -> f64 {
    backend.page_width() - 2.0 * options.margin.x
}

fn add_title_page<B: LayoutBackend>(backend: &mut B, options: &DocumentOptions, title: &str) {
    let previous = backend.font_size();
    backend.set_font_size(options.fonts.title);

    backend.add_page();
    let x = backend.page_width() / 2.0;
    let y = options.margin.y + backend.line_height();
    let width = line_width(backend, options);
    backend.place_text(title, x, y, &TextOptions::centered(width));

    backend.set_font_size(previous);
}

fn add_task_page<B: LayoutBackend>(backend: &mut B, options: &DocumentOptions, task: &RenderedTask) {
    let width = line_width(backend, options);
    let x = options.margin.x;
    let wrap = TextOptions::wrapped(width);
    let mut y = options.margin.y;

    let previous = backend.font_size();
    backend.set_font_size(options.fonts.heading);

    backend.add_page();
    backend.place_text(&task.title, x, y, &wrap);
    y += backend.text_height(&task.title, width);

    backend.set_font_size(options.fonts.body);
    backend.place_text(&task.body, x, y, &wrap);
    y += backend.text_height(&task.body, width);

    // Empty line before questions
    y += backend.line_height() * PT_TO_PX;

    for question in &task.questions {
        backend.place_text(question, x, y, &wrap);
        y += backend.text_height(question, width);
    }

    if y > backend.page_height() - options.margin.y {
        tracing::warn!(task = %task.title, "task content runs past the bottom margin");
    }

    backend.set_font_size(previous);
}

/// Rearrange the task pages starting at `first` so that content page `i`
/// shows task `order[i]`.
fn reorder_pages<B: LayoutBackend>(backend: &mut B, first: usize, order: &[usize]) {
    let mut current: Vec<usize> = (0..order.len()).collect();

    for (target, task) in order.iter().enumerate() {
        let Some(position) = current.iter().position(|t| t == task) else {
            continue;
        };
        if position != target {
            backend.move_page(first + position, first + target);
            let moved = current.remove(position);
            current.insert(target, moved);
        }
    }
}
