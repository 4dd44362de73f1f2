// Tests for typed scalar resource values
//
//  Copyright (C) 2014-2022 Ryan Specialty Group, LLC.
//
//  This file is part of reslink.
//
//  This program is free software: you can redistribute it and/or modify
//  it under the terms of the GNU General Public License as published by
//  the Free Software Foundation, either version 3 of the License, or
//  (at your option) any later version.
//
//  This program is distributed in the hope that it will be useful,
//  but WITHOUT ANY WARRANTY; without even the implied warranty of
//  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//  GNU General Public License for more details.
//
//  You should have received a copy of the GNU General Public License
//  along with this program.  If not, see <http://www.gnu.org/licenses/>.

use super::*;

mod color {
    use super::*;

    #[test]
    fn short_forms_expand_each_nibble() {
        assert_eq!(
            Some(Color {
                format: ColorFormat::Rgb4,
                argb: 0xff11_22ff,
            }),
            Color::parse("#12f"),
        );

        assert_eq!(
            Some(Color {
                format: ColorFormat::Argb4,
                argb: 0x8800_0000,
            }),
            Color::parse("#8000"),
        );
    }

    #[test]
    fn long_forms() {
        assert_eq!(
            Some(Color {
                format: ColorFormat::Rgb8,
                argb: 0xffff_0000,
            }),
            Color::parse("#ff0000"),
        );

        assert_eq!(
            Some(Color {
                format: ColorFormat::Argb8,
                argb: 0x80ff_0000,
            }),
            Color::parse("#80FF0000"),
        );
    }

    #[test]
    fn rejects_non_colors() {
        for bad in ["", "#", "ff0000", "#ff00000", "#gg0000", "#+f0"] {
            assert_eq!(None, Color::parse(bad), "{}", bad);
        }
    }

    #[test]
    fn display_is_full_argb() {
        assert_eq!("#ffaabbcc", Color::parse("#abc").unwrap().to_string());
    }
}

mod complex {
    use super::*;

    #[test]
    fn integral_dimension_uses_radix_23p0() {
        let dim = Complex::parse_dimension("16dp").unwrap();

        assert_eq!(ComplexUnit::Dip, dim.unit());
        assert_eq!(0x0000_1001, dim.data());
        assert_eq!(16.0, dim.to_f32());
    }

    #[test]
    fn dip_and_dp_are_equivalent() {
        assert_eq!(
            Complex::parse_dimension("4dp"),
            Complex::parse_dimension("4dip"),
        );
    }

    #[test]
    fn fractional_dimension_uses_precise_radix() {
        let dim = Complex::parse_dimension("1.5sp").unwrap();

        assert_eq!(ComplexUnit::Sp, dim.unit());
        assert_eq!(0x00c0_0022, dim.data());
        assert_eq!(1.5, dim.to_f32());
    }

    #[test]
    fn negative_dimension() {
        let dim = Complex::parse_dimension("-2px").unwrap();

        assert_eq!(0xffff_fe00, dim.data());
        assert_eq!(-2.0, dim.to_f32());
        assert_eq!("-2px", dim.to_string());
    }

    #[test]
    fn fraction_is_scaled() {
        let frac = Complex::parse_fraction("50%").unwrap();

        assert_eq!(ComplexUnit::Fraction, frac.unit());
        assert_eq!(0x4000_0030, frac.data());
        assert_eq!(0.5, frac.to_f32());
        assert_eq!("50%", frac.to_string());
    }

    #[test]
    fn parent_fraction() {
        let frac = Complex::parse_fraction("100%p").unwrap();

        assert_eq!(ComplexUnit::FractionParent, frac.unit());
        assert_eq!(1.0, frac.to_f32());
    }

    #[test]
    fn largest_integral_dimension() {
        let dim = Complex::parse_dimension("8388607dp").unwrap();

        assert_eq!(8388607.0, dim.to_f32());
    }

    // The mantissa would otherwise wrap and change sign.
    #[test]
    fn rejects_magnitude_beyond_mantissa() {
        assert_eq!(None, Complex::parse_dimension("8388608dp"));
        assert_eq!(None, Complex::parse_dimension("-9000000px"));
        assert_eq!(None, Complex::parse_dimension("10000000dp"));
        assert_eq!(None, Complex::parse_dimension("1e30dp"));
        assert_eq!(None, Complex::parse_fraction("900000000%"));
        assert_eq!(None, Complex::from_f32(f32::INFINITY, ComplexUnit::Px));
    }

    #[test]
    fn rejects_missing_number_or_unit() {
        assert_eq!(None, Complex::parse_dimension("dp"));
        assert_eq!(None, Complex::parse_dimension("16"));
        assert_eq!(None, Complex::parse_dimension("16%"));
        assert_eq!(None, Complex::parse_fraction("16dp"));
        assert_eq!(None, Complex::parse_fraction("%"));
    }
}

#[test]
fn integers() {
    assert_eq!(Some(Integer::Dec(42)), Integer::parse("42"));
    assert_eq!(Some(Integer::Dec(-7)), Integer::parse("-7"));
    assert_eq!(Some(Integer::Hex(0xffff_ffff)), Integer::parse("0xffffffff"));
    assert_eq!(Some(Integer::Hex(0x10)), Integer::parse("0X10"));

    assert_eq!(None, Integer::parse("0x"));
    assert_eq!(None, Integer::parse("0x123456789"));
    assert_eq!(None, Integer::parse("1.5"));
    assert_eq!(None, Integer::parse("4294967296"));
}

#[test]
fn floats() {
    assert_eq!(Some(1.5), parse_float("1.5"));
    assert_eq!(Some(-0.25), parse_float("-.25"));
    assert_eq!(Some(3.0), parse_float("3"));

    assert_eq!(None, parse_float("inf"));
    assert_eq!(None, parse_float("NaN"));
    assert_eq!(None, parse_float("1.5x"));
    assert_eq!(None, parse_float(""));
}

#[test]
fn booleans() {
    assert_eq!(Some(true), parse_bool("true"));
    assert_eq!(Some(true), parse_bool("TRUE"));
    assert_eq!(Some(false), parse_bool("False"));
    assert_eq!(None, parse_bool("yes"));
}
