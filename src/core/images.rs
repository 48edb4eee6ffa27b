//! Image rewriting. Images are served by the owner's content endpoint
//! except the Melodic logo, which is not part of the collection.

use crate::core::links::{append_after_key, has_quoted_attr, is_external};
use crate::domain::model::RewriteSettings;
use regex::{NoExpand, Regex};
use std::sync::LazyLock;

static IMG_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<img.*>").expect("img tag pattern"));
static SRC_QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)src=""#).expect("quoted src pattern"));
static SRC_BARE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)src=").expect("bare src pattern"));
static GICA_PAIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"gica(.*?)gica").expect("gica pair pattern"));

pub const ARGUMENTS_KEY: &str = "arguments";

pub fn rewrite_img(img: &str, owner_id: &str, image_dir: &str, settings: &RewriteSettings) -> String {
    if is_external(img) {
        return img.to_string();
    }
    if !settings.logo_file_name.is_empty() && img.contains(&settings.logo_file_name) {
        return settings.logo_img_tag();
    }

    let new_img = if has_quoted_attr(img, "src") {
        let prefix = format!("src=\"{}/content?{}={}", owner_id, ARGUMENTS_KEY, image_dir);
        SRC_QUOTED.replace_all(img, NoExpand(&prefix)).into_owned()
    } else {
        let prefix = format!("src={}/content?{}={}", owner_id, ARGUMENTS_KEY, image_dir);
        SRC_BARE.replace_all(img, NoExpand(&prefix)).into_owned()
    };
    let new_img = new_img.replace("/\"", "/");
    let new_img = append_after_key(&new_img, ARGUMENTS_KEY, &settings.image_loader_arguments);

    GICA_PAIR.replace_all(&new_img, "gica").into_owned()
}

/// `image_dir` is `<collection>/<dir>`.
pub fn rewrite_imgs_in_line(
    line: &str,
    owner_id: &str,
    image_dir: &str,
    settings: &RewriteSettings,
) -> String {
    let mut new_line = line.to_string();
    for img in IMG_TAG.find_iter(line) {
        let img = img.as_str();
        let new_img = rewrite_img(img, owner_id, image_dir, settings);
        if new_img != img {
            new_line = new_line.replace(img, &new_img);
        }
    }
    new_line
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOADER: &str = "&content_loader=collection_file&content_viewer=off&viewer=image_file&viewer_userfile_class=ImageFile";

    #[test]
    fn test_quoted_src_points_at_content_endpoint() {
        let settings = RewriteSettings::default();
        assert_eq!(
            rewrite_imgs_in_line("<img src=\"tsplot/t1.png\">", "42", "run1/filtered_func.ica/", &settings),
            format!("<img src=\"42/content?arguments=run1/filtered_func.ica/tsplot/t1.png{}\">", LOADER)
        );
    }

    #[test]
    fn test_bare_src() {
        let settings = RewriteSettings::default();
        assert_eq!(
            rewrite_img("<IMG SRC=stats/thresh_zstat1.png >", "9", "col/d/", &settings),
            format!("<IMG src=9/content?arguments=col/d/stats/thresh_zstat1.png{} >", LOADER)
        );
    }

    #[test]
    fn test_logo_replaced_by_external_image() {
        let settings = RewriteSettings::default();
        assert_eq!(
            rewrite_imgs_in_line("<IMG BORDER=0 SRC=\".files/fsl-logo-big.jpg\">", "42", "c/d/", &settings),
            "<img src=\"http://fsl.fmrib.ox.ac.uk/fsl/wiki_static/fsl/img/fsl-logo-big.jpg\" width=165/>"
        );
    }

    #[test]
    fn test_external_img_untouched() {
        let settings = RewriteSettings::default();
        let line = "<img src=\"https://example.org/a.png\">";
        assert_eq!(rewrite_imgs_in_line(line, "42", "c/d/", &settings), line);
    }

    #[test]
    fn test_duplicated_gica_collapsed() {
        let settings = RewriteSettings::default();
        let rewritten = rewrite_img(
            "<img src=\"../group.gica/report/IC_1_thresh.png\">",
            "42",
            "study/group.gica/",
            &settings,
        );
        assert!(rewritten.starts_with("<img src=\"42/content?arguments=study/group.gica/report/IC_1_thresh.png&"));
    }

    #[test]
    fn test_custom_loader_arguments() {
        let settings = RewriteSettings {
            image_loader_arguments: "&viewer=raw".to_string(),
            ..RewriteSettings::default()
        };
        assert_eq!(
            rewrite_img("<img src=\"a.png\">", "1", "c/d/", &settings),
            "<img src=\"1/content?arguments=c/d/a.png&viewer=raw\">"
        );
    }
}
