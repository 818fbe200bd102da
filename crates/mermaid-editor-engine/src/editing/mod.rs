/*!
 * # Editing Core Module
 *
 * The in-memory side of the editor: a [`Document`] holding the diagram
 * source and the [`Patch`] describing each change.
 *
 * ## Architecture Overview
 *
 * ### 1. Single Source of Truth: xi-rope Buffer
 * - The diagram is stored in a single **`xi_rope::Rope`** buffer
 * - Edits are expressed as xi-rope **Deltas** and applied in one step
 *
 * ### 2. Change Events
 * - Each effective edit bumps the document **version**
 * - The version lets the render pipeline and hosts detect changes
 *
 * ### 3. Formatting Replaces the Whole Buffer
 * - The formatter runs over a `&str` view and produces a complete new text
 * - The buffer is swapped in a single mutation, so formatting is all or nothing
 *
 * ## Module Structure
 *
 * - **`document`**: `Document` type with xi-rope buffer, selection and version
 * - **`patch`**: Edit result metadata including changed ranges and new selection
 */

pub mod document;
pub mod patch;

pub use document::Document;
pub use patch::Patch;
