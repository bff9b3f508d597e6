use serde::{Deserialize, Serialize};

/// Which GST components apply to an invoice, and whether quoted rates
/// already contain tax.
///
/// CGST+SGST/UTGST each take half of the nominal rate; IGST takes the full
/// nominal rate. The components are alternative regimes (intra-state vs
/// inter-state) and the UI keeps them mutually exclusive, but the calculator
/// honors whatever combination is toggled on — including none or all three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSettings {
    #[serde(rename = "showCGST")]
    pub show_cgst: bool,
    #[serde(rename = "showIGST")]
    pub show_igst: bool,
    #[serde(rename = "showUTGST")]
    pub show_utgst: bool,
    #[serde(rename = "taxIncluded")]
    pub tax_included: bool,
}

impl Default for TaxSettings {
    fn default() -> Self {
        // Intra-state CGST, tax on top: the stored documents' defaults.
        Self {
            show_cgst: true,
            show_igst: false,
            show_utgst: false,
            tax_included: false,
        }
    }
}

impl TaxSettings {
    /// Sum of the rates of all currently active components, as a percentage.
    ///
    /// `nominal` is the line's nominal tax rate; CGST and UTGST each
    /// contribute half of it, IGST contributes all of it.
    pub fn effective_rate(&self, nominal: f64) -> f64 {
        let mut rate = 0.0;
        if self.show_cgst {
            rate += nominal / 2.0;
        }
        if self.show_igst {
            rate += nominal;
        }
        if self.show_utgst {
            rate += nominal / 2.0;
        }
        rate
    }
}

/// Calculated amounts for a single line item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineAmounts {
    /// Taxable base (pre-tax line value).
    pub base_amount: f64,
    pub cgst: f64,
    pub igst: f64,
    pub utgst: f64,
    /// Line grand total: base plus all active components.
    pub total_amount: f64,
}

/// Aggregated amounts for a whole invoice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTotals {
    pub base_amount: f64,
    pub cgst: f64,
    pub igst: f64,
    pub utgst: f64,
    pub total_tax: f64,
    pub grand_total: f64,
}

impl InvoiceTotals {
    pub const ZERO: Self = Self {
        base_amount: 0.0,
        cgst: 0.0,
        igst: 0.0,
        utgst: 0.0,
        total_tax: 0.0,
        grand_total: 0.0,
    };
}

/// A stored line the invoice aggregator can fold over.
///
/// Line items persist only their grand total and tax components; the taxable
/// base is not stored and is derived back out during aggregation.
pub trait TaxedLine {
    /// Line grand total as persisted on the item.
    fn amount(&self) -> f64;
    fn cgst(&self) -> f64;
    fn igst(&self) -> f64;
    fn utgst(&self) -> f64;
}

impl TaxedLine for LineAmounts {
    fn amount(&self) -> f64 {
        self.total_amount
    }

    fn cgst(&self) -> f64 {
        self.cgst
    }

    fn igst(&self) -> f64 {
        self.igst
    }

    fn utgst(&self) -> f64 {
        self.utgst
    }
}

/// Round to 2 decimal places, ties away from zero (currency rounding).
pub fn round_half_up(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Calculate one line item's taxable base, tax components and grand total.
///
/// Total over its numeric domain: no validation is performed and nothing is
/// raised. Callers must reject negative quantity/rate and out-of-range tax
/// rates up front; non-finite inputs propagate into the outputs untouched.
///
/// Each output is rounded to 2 decimals independently, so the rounded
/// `total_amount` is not guaranteed to equal the sum of the other rounded
/// fields to the last cent. Known quirk, kept deliberately.
pub fn calculate_item_amount(
    quantity: f64,
    rate: f64,
    tax_rate: f64,
    tax_included: bool,
    settings: &TaxSettings,
) -> LineAmounts {
    let gross = quantity * rate;

    let base_amount = if tax_included {
        // Rate already contains tax: back the embedded tax out of the gross.
        gross / (1.0 + settings.effective_rate(tax_rate) / 100.0)
    } else {
        gross
    };

    // Components are computed from the taxable base, not from the gross.
    let cgst = if settings.show_cgst {
        base_amount * (tax_rate / 2.0) / 100.0
    } else {
        0.0
    };
    let igst = if settings.show_igst {
        base_amount * tax_rate / 100.0
    } else {
        0.0
    };
    let utgst = if settings.show_utgst {
        base_amount * (tax_rate / 2.0) / 100.0
    } else {
        0.0
    };

    let total_amount = base_amount + cgst + igst + utgst;

    LineAmounts {
        base_amount: round_half_up(base_amount),
        cgst: round_half_up(cgst),
        igst: round_half_up(igst),
        utgst: round_half_up(utgst),
        total_amount: round_half_up(total_amount),
    }
}

/// Aggregate already-calculated line items into invoice totals.
///
/// Order of items is irrelevant. An empty slice yields all-zero totals.
/// Malformed numeric fields (NaN/∞) propagate; they are a caller-side
/// validation bug, not sanitized here.
pub fn calculate_invoice_totals<L: TaxedLine>(items: &[L]) -> InvoiceTotals {
    let mut base_amount = 0.0;
    let mut cgst = 0.0;
    let mut igst = 0.0;
    let mut utgst = 0.0;
    let mut grand_total = 0.0;

    for item in items {
        // Items persist only their total; derive the base back out of the
        // stored total and tax components.
        base_amount += item.amount() - item.cgst() - item.igst() - item.utgst();
        cgst += item.cgst();
        igst += item.igst();
        utgst += item.utgst();
        grand_total += item.amount();
    }

    InvoiceTotals {
        base_amount: round_half_up(base_amount),
        cgst: round_half_up(cgst),
        igst: round_half_up(igst),
        utgst: round_half_up(utgst),
        total_tax: round_half_up(cgst + igst + utgst),
        grand_total: round_half_up(grand_total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn igst_only() -> TaxSettings {
        TaxSettings {
            show_cgst: false,
            show_igst: true,
            show_utgst: false,
            tax_included: false,
        }
    }

    fn intra_state() -> TaxSettings {
        TaxSettings {
            show_cgst: true,
            show_igst: false,
            show_utgst: true,
            tax_included: false,
        }
    }

    fn no_components() -> TaxSettings {
        TaxSettings {
            show_cgst: false,
            show_igst: false,
            show_utgst: false,
            tax_included: false,
        }
    }

    #[test]
    fn igst_line_uses_full_nominal_rate() {
        let amounts = calculate_item_amount(10.0, 100.0, 18.0, false, &igst_only());
        assert_eq!(amounts.base_amount, 1000.00);
        assert_eq!(amounts.igst, 180.00);
        assert_eq!(amounts.cgst, 0.0);
        assert_eq!(amounts.utgst, 0.0);
        assert_eq!(amounts.total_amount, 1180.00);
    }

    #[test]
    fn cgst_and_utgst_split_the_nominal_rate() {
        let amounts = calculate_item_amount(10.0, 100.0, 18.0, false, &intra_state());
        assert_eq!(amounts.base_amount, 1000.00);
        assert_eq!(amounts.cgst, 90.00);
        assert_eq!(amounts.utgst, 90.00);
        assert_eq!(amounts.igst, 0.0);
        assert_eq!(amounts.total_amount, 1180.00);
    }

    #[test]
    fn tax_included_backs_the_tax_out_of_the_rate() {
        let amounts = calculate_item_amount(1.0, 118.0, 18.0, true, &igst_only());
        assert_eq!(amounts.base_amount, 100.00);
        assert_eq!(amounts.igst, 18.00);
        assert_eq!(amounts.total_amount, 118.00);
    }

    #[test]
    fn zero_tax_rate_yields_no_tax_regardless_of_toggles() {
        let all_on = TaxSettings {
            show_cgst: true,
            show_igst: true,
            show_utgst: true,
            tax_included: false,
        };
        let amounts = calculate_item_amount(3.0, 50.0, 0.0, false, &all_on);
        assert_eq!(amounts.base_amount, 150.00);
        assert_eq!(amounts.cgst, 0.0);
        assert_eq!(amounts.igst, 0.0);
        assert_eq!(amounts.utgst, 0.0);
        assert_eq!(amounts.total_amount, 150.00);
    }

    #[test]
    fn zero_quantity_or_rate_yields_all_zero() {
        let amounts = calculate_item_amount(0.0, 100.0, 18.0, false, &igst_only());
        assert_eq!(amounts.total_amount, 0.0);
        assert_eq!(amounts.base_amount, 0.0);

        let amounts = calculate_item_amount(10.0, 0.0, 18.0, true, &igst_only());
        assert_eq!(amounts.total_amount, 0.0);
        assert_eq!(amounts.igst, 0.0);
    }

    #[test]
    fn no_components_makes_inclusive_division_a_noop() {
        let mut settings = no_components();
        settings.tax_included = true;
        let amounts = calculate_item_amount(4.0, 25.5, 18.0, true, &settings);
        assert_eq!(amounts.base_amount, 102.00);
        assert_eq!(amounts.total_amount, 102.00);
        assert_eq!(amounts.cgst, 0.0);
        assert_eq!(amounts.igst, 0.0);
        assert_eq!(amounts.utgst, 0.0);
    }

    #[test]
    fn all_three_components_sum_when_toggled_together() {
        // Exclusivity is a UI concern; the calculator honors what it is given.
        let all_on = TaxSettings {
            show_cgst: true,
            show_igst: true,
            show_utgst: true,
            tax_included: false,
        };
        let amounts = calculate_item_amount(1.0, 100.0, 10.0, false, &all_on);
        assert_eq!(amounts.cgst, 5.00);
        assert_eq!(amounts.igst, 10.00);
        assert_eq!(amounts.utgst, 5.00);
        assert_eq!(amounts.total_amount, 120.00);
    }

    #[test]
    fn outputs_round_to_two_decimals_half_away_from_zero() {
        // 1 × 0.125 with no tax: base rounds 0.125 -> 0.13.
        let amounts = calculate_item_amount(1.0, 0.125, 0.0, false, &no_components());
        assert_eq!(amounts.base_amount, 0.13);
        assert_eq!(amounts.total_amount, 0.13);
    }

    #[test]
    fn non_finite_inputs_propagate() {
        let amounts = calculate_item_amount(f64::NAN, 100.0, 18.0, false, &igst_only());
        assert!(amounts.total_amount.is_nan());
        assert!(amounts.base_amount.is_nan());
    }

    #[test]
    fn empty_invoice_aggregates_to_zero() {
        let totals = calculate_invoice_totals::<LineAmounts>(&[]);
        assert_eq!(totals, InvoiceTotals::ZERO);
    }

    #[test]
    fn aggregation_of_the_reference_scenarios() {
        let igst_line = calculate_item_amount(10.0, 100.0, 18.0, false, &igst_only());
        let intra_line = calculate_item_amount(10.0, 100.0, 18.0, false, &intra_state());

        let totals = calculate_invoice_totals(&[igst_line, intra_line]);
        assert_eq!(totals.grand_total, 2360.00);
        assert_eq!(totals.total_tax, 360.00);
        assert_eq!(totals.base_amount, 2000.00);
        assert_eq!(totals.cgst, 90.00);
        assert_eq!(totals.igst, 180.00);
        assert_eq!(totals.utgst, 90.00);
    }

    #[test]
    fn grand_total_comes_from_stored_amounts_not_rates() {
        // Hand-built lines whose stored figures do not match any rate math:
        // the aggregator must trust the persisted fields.
        struct Stored {
            amount: f64,
            cgst: f64,
            igst: f64,
            utgst: f64,
        }
        impl TaxedLine for Stored {
            fn amount(&self) -> f64 {
                self.amount
            }
            fn cgst(&self) -> f64 {
                self.cgst
            }
            fn igst(&self) -> f64 {
                self.igst
            }
            fn utgst(&self) -> f64 {
                self.utgst
            }
        }

        let lines = [
            Stored {
                amount: 110.0,
                cgst: 5.0,
                igst: 0.0,
                utgst: 5.0,
            },
            Stored {
                amount: 236.0,
                cgst: 0.0,
                igst: 36.0,
                utgst: 0.0,
            },
        ];

        let totals = calculate_invoice_totals(&lines);
        assert_eq!(totals.grand_total, 346.00);
        assert_eq!(totals.base_amount, 300.00);
        assert_eq!(totals.total_tax, 46.00);
    }

    #[test]
    fn aggregation_order_is_irrelevant() {
        let a = calculate_item_amount(3.0, 99.99, 12.0, false, &igst_only());
        let b = calculate_item_amount(7.0, 14.5, 28.0, true, &igst_only());
        let c = calculate_item_amount(1.0, 0.07, 5.0, false, &intra_state());

        assert_eq!(
            calculate_invoice_totals(&[a, b, c]),
            calculate_invoice_totals(&[c, a, b])
        );
    }

    #[test]
    fn tax_settings_serde_uses_stored_document_field_names() {
        let json = serde_json::to_string(&TaxSettings::default()).unwrap();
        assert!(json.contains("\"showCGST\":true"));
        assert!(json.contains("\"showIGST\":false"));
        assert!(json.contains("\"showUTGST\":false"));
        assert!(json.contains("\"taxIncluded\":false"));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_settings() -> impl Strategy<Value = TaxSettings> {
            (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
                |(show_cgst, show_igst, show_utgst, tax_included)| TaxSettings {
                    show_cgst,
                    show_igst,
                    show_utgst,
                    tax_included,
                },
            )
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 1000,
                ..ProptestConfig::default()
            })]

            /// Property: with tax on top, the rounded total stays within
            /// rounding drift of the sum of the other rounded outputs.
            /// Five values round independently at half a cent each, so the
            /// worst case is 0.025, not a single cent.
            #[test]
            fn total_matches_component_sum_within_rounding_drift(
                quantity in 0.0..1_000.0f64,
                rate in 0.0..10_000.0f64,
                tax_rate in 0.0..100.0f64,
                mut settings in arb_settings(),
            ) {
                settings.tax_included = false;
                let a = calculate_item_amount(quantity, rate, tax_rate, false, &settings);
                let reassembled = a.base_amount + a.cgst + a.igst + a.utgst;
                prop_assert!((a.total_amount - reassembled).abs() <= 0.025 + 1e-9);
            }

            /// Property: all components off means no tax and base == gross.
            #[test]
            fn no_components_yields_plain_gross(
                quantity in 0.0..1_000.0f64,
                rate in 0.0..10_000.0f64,
                tax_rate in 0.0..100.0f64,
                tax_included in any::<bool>(),
            ) {
                let settings = TaxSettings {
                    show_cgst: false,
                    show_igst: false,
                    show_utgst: false,
                    tax_included,
                };
                let a = calculate_item_amount(quantity, rate, tax_rate, tax_included, &settings);
                prop_assert_eq!(a.cgst, 0.0);
                prop_assert_eq!(a.igst, 0.0);
                prop_assert_eq!(a.utgst, 0.0);
                prop_assert_eq!(a.base_amount, round_half_up(quantity * rate));
                prop_assert_eq!(a.total_amount, a.base_amount);
            }

            /// Property: tax-inclusive with a single component re-adds to the
            /// original gross within a cent.
            #[test]
            fn inclusive_round_trip_recovers_gross(
                quantity in 0.01..1_000.0f64,
                rate in 0.01..10_000.0f64,
                tax_rate in 0.0..100.0f64,
            ) {
                let settings = TaxSettings {
                    show_cgst: false,
                    show_igst: true,
                    show_utgst: false,
                    tax_included: true,
                };
                let a = calculate_item_amount(quantity, rate, tax_rate, true, &settings);
                let gross = quantity * rate;
                // Recover tax from the unrounded relationship base*(1+r/100).
                let readded = a.base_amount * (1.0 + tax_rate / 100.0);
                prop_assert!(
                    (readded - gross).abs() <= 0.01 * (1.0 + tax_rate / 100.0) + 1e-6,
                    "gross {} vs re-added {}", gross, readded
                );
            }

            /// Property: the aggregator's grand total is the rounded sum of
            /// stored line amounts, independent of ordering.
            #[test]
            fn aggregator_sums_stored_amounts(
                lines in proptest::collection::vec(
                    (0.0..100.0f64, 0.0..1_000.0f64, 0.0..100.0f64),
                    0..12,
                ),
            ) {
                let settings = intra_state();
                let amounts: Vec<LineAmounts> = lines
                    .iter()
                    .map(|&(q, r, t)| calculate_item_amount(q, r, t, false, &settings))
                    .collect();

                let totals = calculate_invoice_totals(&amounts);
                let sum: f64 = amounts.iter().map(|a| a.total_amount).sum();
                prop_assert_eq!(totals.grand_total, round_half_up(sum));

                let mut reversed = amounts.clone();
                reversed.reverse();
                prop_assert_eq!(totals, calculate_invoice_totals(&reversed));
            }
        }
    }
}
