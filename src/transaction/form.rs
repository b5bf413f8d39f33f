//! The dialog with the form for adding a transaction.

use maud::{Markup, html};
use time::Date;

use crate::{
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE,
        FORM_RADIO_INPUT_STYLE, FORM_RADIO_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, loading_spinner,
    },
    transaction::category::{CATEGORY_DATALIST_ID, category_datalist},
};

/// The `id` of the add transaction `<dialog>` element.
pub(crate) const ADD_TRANSACTION_DIALOG_ID: &str = "add-transaction-dialog";

/// A button that opens the add transaction dialog.
pub(crate) fn add_transaction_button() -> Markup {
    html! {
        button
            type="button"
            class="px-4 py-2 bg-blue-500 dark:bg-blue-600 text-white rounded
                hover:enabled:bg-blue-600 hover:enabled:dark:bg-blue-700"
            onclick={ "document.getElementById('" (ADD_TRANSACTION_DIALOG_ID) "').showModal()" }
        {
            "Add transaction"
        }
    }
}

/// The add transaction dialog.
///
/// `today` is the default date, `category_suggestions` fills the category
/// datalist until the user starts typing.
pub(crate) fn add_transaction_dialog(today: Date, category_suggestions: &[&str]) -> Markup {
    html! {
        dialog
            id=(ADD_TRANSACTION_DIALOG_ID)
            class="w-full max-w-md p-6 rounded-lg shadow-xl bg-white dark:bg-gray-800
                text-gray-900 dark:text-white backdrop:bg-black/50"
        {
            h2 class="text-xl font-bold mb-4" { "Add transaction" }

            form
                hx-post=(endpoints::TRANSACTIONS_API)
                hx-target-error="#alert-container"
                hx-indicator="#add-transaction-indicator"
                hx-disabled-elt="#add-transaction-submit"
                class="space-y-4"
            {
                (transaction_form_fields(today, category_suggestions))

                div class="flex flex-row-reverse gap-x-4"
                {
                    button
                        type="submit"
                        id="add-transaction-submit"
                        tabindex="0"
                        class=(BUTTON_PRIMARY_STYLE)
                    {
                        span class="inline htmx-indicator" id="add-transaction-indicator"
                        {
                            (loading_spinner())
                        }
                        "Save"
                    }

                    button
                        type="button"
                        class=(BUTTON_SECONDARY_STYLE)
                        onclick={ "document.getElementById('" (ADD_TRANSACTION_DIALOG_ID) "').close()" }
                    {
                        "Cancel"
                    }
                }
            }
        }
    }
}

fn transaction_form_fields(today: Date, category_suggestions: &[&str]) -> Markup {
    html! {
        fieldset class="space-y-2"
        {
            legend class=(FORM_LABEL_STYLE) { "Type" }

            div class=(FORM_RADIO_GROUP_STYLE)
            {
                div class="flex items-center gap-3"
                {
                    input
                        name="kind"
                        id="transaction-kind-expense"
                        type="radio"
                        value="expense"
                        checked
                        required
                        tabindex="0"
                        class=(FORM_RADIO_INPUT_STYLE);

                    label
                        for="transaction-kind-expense"
                        class=(FORM_RADIO_LABEL_STYLE)
                    {
                        "Expense"
                    }
                }

                div class="flex items-center gap-3"
                {
                    input
                        name="kind"
                        id="transaction-kind-income"
                        type="radio"
                        value="income"
                        required
                        tabindex="0"
                        class=(FORM_RADIO_INPUT_STYLE);

                    label
                        for="transaction-kind-income"
                        class=(FORM_RADIO_LABEL_STYLE)
                    {
                        "Income"
                    }
                }
            }
        }

        div
        {
            label
                for="amount"
                class=(FORM_LABEL_STYLE)
            {
                "Amount"
            }

            div class="input-wrapper w-full"
            {
                input
                    name="amount"
                    id="amount"
                    type="number"
                    step="0.01"
                    placeholder="0.01"
                    min="0.01"
                    required
                    autofocus
                    class=(FORM_TEXT_INPUT_STYLE);
            }
        }

        div
        {
            label
                for="category"
                class=(FORM_LABEL_STYLE)
            {
                "Category"
            }

            input
                name="category"
                id="category"
                type="text"
                list=(CATEGORY_DATALIST_ID)
                placeholder="e.g. Food"
                required
                autocomplete="off"
                hx-get=(endpoints::CATEGORIES_API)
                hx-trigger="input changed delay:300ms"
                hx-target={ "#" (CATEGORY_DATALIST_ID) }
                hx-swap="innerHTML"
                class=(FORM_TEXT_INPUT_STYLE);

            (category_datalist(category_suggestions))
        }

        div
        {
            label
                for="date"
                class=(FORM_LABEL_STYLE)
            {
                "Date"
            }

            input
                name="date"
                id="date"
                type="date"
                value=(today)
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="description"
                class=(FORM_LABEL_STYLE)
            {
                "Description (optional)"
            }

            input
                name="description"
                id="description"
                type="text"
                placeholder="Description"
                class=(FORM_TEXT_INPUT_STYLE);
        }
    }
}
