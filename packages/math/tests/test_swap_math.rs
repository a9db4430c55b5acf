// Single swap step

use tidalswap_math::*;

const E18: u128 = 1_000_000_000_000_000_000;

fn u(s: &str) -> U256 {
    U256::from_dec_str(s).unwrap()
}

#[test]
fn test_exact_in_capped_at_target_one_for_zero() {
    // sqrt(1.01) * 2^96
    let target = u("79623317895830914510639640423");
    let step = compute_swap_step(Q96, target, 2 * E18, E18 as i128, 600).unwrap();

    assert_eq!(step.amount_in, U256::from(9975124224178055u128));
    assert_eq!(step.fee_amount, U256::from(5988667735148u128));
    assert_eq!(step.amount_out, U256::from(9925619580021728u128));
    assert_eq!(step.sqrt_price_next_x96, target);
    assert!(step.amount_in + step.fee_amount < U256::from(E18));
}

#[test]
fn test_exact_out_fully_received_one_for_zero() {
    let target = Q96 * 10;
    let step = compute_swap_step(Q96, target, 2 * E18, -(E18 as i128), 600).unwrap();

    assert_eq!(step.amount_in, U256::from(2 * E18));
    assert_eq!(step.fee_amount, U256::from(1200720432259356u128));
    assert_eq!(step.amount_out, U256::from(E18));
    assert!(step.sqrt_price_next_x96 < target);
}

#[test]
fn test_amount_out_capped_at_requested() {
    let step = compute_swap_step(
        u("417332158212080721273783715441582"),
        u("1452870262520218020823638996"),
        159344665391607089467575320103,
        -1,
        1,
    )
    .unwrap();

    assert_eq!(step.amount_in, U256::one());
    assert_eq!(step.fee_amount, U256::one());
    assert_eq!(step.amount_out, U256::one());
    assert_eq!(
        step.sqrt_price_next_x96,
        u("417332158212080721273783715441581")
    );
}

#[test]
fn test_entire_input_taken_as_fee() {
    let step = compute_swap_step(
        U256::from(2413u32),
        u("79887613182836312"),
        1985041575832132834610021537970,
        10,
        1872,
    )
    .unwrap();

    assert!(step.amount_in.is_zero());
    assert_eq!(step.fee_amount, U256::from(10u32));
    assert!(step.amount_out.is_zero());
    assert_eq!(step.sqrt_price_next_x96, U256::from(2413u32));
}

#[test]
fn test_zero_liquidity_moves_straight_to_target() {
    let target = get_sqrt_ratio_at_tick(-600).unwrap();
    let step = compute_swap_step(Q96, target, 0, 1_000, 3000).unwrap();

    assert_eq!(step.sqrt_price_next_x96, target);
    assert!(step.amount_in.is_zero());
    assert!(step.amount_out.is_zero());
    assert!(step.fee_amount.is_zero());
}
